//! Read-only access to a serialized OPC package.
//!
//! PackageReader resolves content types from `[Content_Types].xml` and parses
//! `.rels` parts on demand. It is used to load presentation templates and to
//! read back generated decks.

use crate::ooxml::opc::constants::{relationship_type, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::path::Path;

/// Content type map for looking up content types by part name or extension.
///
/// Implements the OPC discovery rule: an Override for the exact partname
/// wins, otherwise the Default for the (case-insensitive) extension applies.
#[derive(Debug, Default)]
pub(crate) struct ContentTypeMap {
    /// Maps lower-cased file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps lower-cased partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub(crate) fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let mut key = None;
                    let mut content_type = None;

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => {
                                key = Some(attr.unescape_value()?.to_lowercase());
                            },
                            b"ContentType" => {
                                content_type = Some(attr.unescape_value()?.to_string());
                            },
                            _ => {},
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        match e.local_name().as_ref() {
                            b"Default" => {
                                map.defaults.insert(key, ct);
                            },
                            b"Override" => {
                                map.overrides.insert(key, ct);
                            },
                            _ => {},
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Look up the content type for a partname.
    pub(crate) fn get(&self, partname: &PackURI) -> Result<&str> {
        self.overrides
            .get(&partname.as_str().to_lowercase())
            .or_else(|| self.defaults.get(&partname.ext().to_lowercase()))
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }
}

/// Parse the XML of a `.rels` part into a relationship collection whose
/// targets resolve against `base_uri`.
pub(crate) fn parse_rels_xml(rels_xml: &[u8], base_uri: &str) -> Result<Relationships> {
    let mut rels = Relationships::new(base_uri.to_string());
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut r_id = None;
                let mut reltype = None;
                let mut target_ref = None;
                let mut is_external = false;

                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"Id" => r_id = Some(attr.unescape_value()?.to_string()),
                        b"Type" => reltype = Some(attr.unescape_value()?.to_string()),
                        b"Target" => target_ref = Some(attr.unescape_value()?.to_string()),
                        b"TargetMode" => {
                            is_external = attr.unescape_value()? == target_mode::EXTERNAL;
                        },
                        _ => {},
                    }
                }

                if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                    rels.add_relationship(rt, tr, id, is_external);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read-only view of a package on disk or in memory.
pub struct PackageReader {
    phys: PhysPkgReader,
    content_types: ContentTypeMap,
}

impl PackageReader {
    /// Open a package file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys(PhysPkgReader::open(path)?)
    }

    /// Read a package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_phys(PhysPkgReader::from_bytes(data)?)
    }

    fn from_phys(mut phys: PhysPkgReader) -> Result<Self> {
        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypeMap::from_xml(&phys.blob_for(&content_types_uri)?)?;
        Ok(Self {
            phys,
            content_types,
        })
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    /// Raw content of a part.
    pub fn blob(&mut self, partname: &PackURI) -> Result<Vec<u8>> {
        self.phys.blob_for(partname)
    }

    /// Relationships of a part (or of the package, for `/`).
    ///
    /// A part without a `.rels` member has an empty collection.
    pub fn rels_for(&mut self, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri().map_err(OpcError::InvalidPackUri)?;
        if !self.phys.contains(&rels_uri) {
            return Ok(Relationships::new(source.base_uri().to_string()));
        }
        let xml = self.phys.blob_for(&rels_uri)?;
        parse_rels_xml(&xml, source.base_uri())
    }

    /// Partname of the main document part (`/ppt/presentation.xml` for a
    /// presentation), found through the package-level officeDocument
    /// relationship.
    pub fn main_document_partname(&mut self) -> Result<PackURI> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels = self.rels_for(&package_uri)?;
        rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)?
            .target_partname()
    }

    /// Partnames of every non-relationship member.
    pub fn partnames(&self) -> Vec<PackURI> {
        self.phys
            .member_names()
            .into_iter()
            .filter(|name| !name.ends_with(".rels") && name != &CONTENT_TYPES_URI[1..])
            .filter_map(|name| PackURI::new(format!("/{}", name)).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_content_type_lookup() {
        let xml = br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
</Types>"#;
        let map = ContentTypeMap::from_xml(xml).unwrap();

        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert_eq!(map.get(&slide).unwrap(), ct::PML_SLIDE);

        let other = PackURI::new("/ppt/presProps.xml").unwrap();
        assert_eq!(map.get(&other).unwrap(), ct::XML);

        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        assert_eq!(map.get(&image).unwrap(), ct::PNG);

        let unknown = PackURI::new("/ppt/media/video.mp4").unwrap();
        assert!(matches!(map.get(&unknown), Err(OpcError::ContentTypeNotFound(_))));
    }

    #[test]
    fn test_parse_rels_xml() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;
        let rels = parse_rels_xml(xml, "/ppt/slideMasters").unwrap();

        assert_eq!(rels.len(), 3);
        assert_eq!(
            rels.get("rId1").unwrap().target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );
        assert_eq!(
            rels.part_with_reltype(relationship_type::THEME)
                .unwrap()
                .target_partname()
                .unwrap()
                .as_str(),
            "/ppt/theme/theme1.xml"
        );

        let link = rels.get("rId3").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
    }
}
