//! Presentation templates.
//!
//! A template is the set of parts slides are allocated from: one slide
//! master, its slide layouts (in the order of the master's
//! `p:sldLayoutIdLst`), the theme and anything those parts reference, such
//! as images. Template parts are copied verbatim into every written package.
//!
//! The built-in template carries the "Title Slide" and "Title and Content"
//! layouts; [`Template::from_pptx`] loads the master of an existing
//! presentation instead.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{BlobPart, PackURI, PackageReader, Part};
use crate::ooxml::pptx::parts::{SlideSize, scan_layout_ids, scan_presentation};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const SLIDE_MASTER_XML: &str = include_str!("../../../resources/pptx/slideMasters/slideMaster1.xml");
const TITLE_LAYOUT_XML: &str = include_str!("../../../resources/pptx/slideLayouts/slideLayout1.xml");
const CONTENT_LAYOUT_XML: &str =
    include_str!("../../../resources/pptx/slideLayouts/slideLayout2.xml");
const THEME_XML: &str = include_str!("../../../resources/pptx/theme/theme1.xml");

/// `p:sldMasterId/@id` used when a template does not record one.
pub(crate) const DEFAULT_MASTER_ID: u32 = 2_147_483_648;

/// `presProps.xml` for new presentations.
pub(crate) fn default_pres_props_xml() -> &'static str {
    include_str!("../../../resources/pptx/presProps.xml")
}

/// `viewProps.xml` for new presentations.
pub(crate) fn default_view_props_xml() -> &'static str {
    include_str!("../../../resources/pptx/viewProps.xml")
}

/// `tableStyles.xml` for new presentations.
pub(crate) fn default_table_styles_xml() -> &'static str {
    include_str!("../../../resources/pptx/tableStyles.xml")
}

fn pack_uri(uri: &str) -> Result<PackURI> {
    Ok(PackURI::new(uri).map_err(OpcError::InvalidPackUri)?)
}

/// Slide master, layouts and theme that slides are allocated from.
#[derive(Debug, Clone)]
pub struct Template {
    /// Every template part with its relationships, master first
    parts: Vec<BlobPart>,
    master: PackURI,
    master_id: u32,
    theme: Option<PackURI>,
    /// Layout partnames in layout-gallery order
    layouts: Vec<PackURI>,
    slide_size: SlideSize,
}

impl Template {
    /// The template compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let master_uri = pack_uri("/ppt/slideMasters/slideMaster1.xml")?;
        let theme_uri = pack_uri("/ppt/theme/theme1.xml")?;
        let layout_uris = [
            pack_uri("/ppt/slideLayouts/slideLayout1.xml")?,
            pack_uri("/ppt/slideLayouts/slideLayout2.xml")?,
        ];

        // The master's sldLayoutIdLst names rId1 and rId2, so layouts are
        // related before the theme.
        let mut master = BlobPart::new(
            master_uri.clone(),
            ct::PML_SLIDE_MASTER,
            SLIDE_MASTER_XML.as_bytes().to_vec(),
        );
        for layout in &layout_uris {
            master.relate_to(layout, rt::SLIDE_LAYOUT);
        }
        master.relate_to(&theme_uri, rt::THEME);

        let mut parts = vec![master];
        for (uri, xml) in layout_uris.iter().zip([TITLE_LAYOUT_XML, CONTENT_LAYOUT_XML]) {
            let mut layout = BlobPart::new(uri.clone(), ct::PML_SLIDE_LAYOUT, xml.as_bytes().to_vec());
            layout.relate_to(&master_uri, rt::SLIDE_MASTER);
            parts.push(layout);
        }
        parts.push(BlobPart::new(
            theme_uri.clone(),
            ct::OFC_THEME,
            THEME_XML.as_bytes().to_vec(),
        ));

        Ok(Self {
            parts,
            master: master_uri,
            master_id: DEFAULT_MASTER_ID,
            theme: Some(theme_uri),
            layouts: layout_uris.to_vec(),
            slide_size: SlideSize::default(),
        })
    }

    /// Load the first slide master of an existing presentation.
    pub fn from_pptx<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "loading template");
        Self::from_reader(PackageReader::open(path)?)
    }

    /// Load the first slide master of a presentation held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(PackageReader::from_bytes(data)?)
    }

    fn from_reader(mut reader: PackageReader) -> Result<Self> {
        let main = reader.main_document_partname()?;
        let ids = scan_presentation(&reader.blob(&main)?)?;
        let pres_rels = reader.rels_for(&main)?;

        let master_rid = ids
            .masters
            .first()
            .ok_or_else(|| OoxmlError::PartNotFound("slide master".to_string()))?;
        let master = pres_rels
            .get(master_rid)
            .ok_or_else(|| OpcError::RelationshipNotFound(master_rid.clone()))?
            .target_partname()?;

        let master_type = reader.content_type(&master)?;
        if master_type != ct::PML_SLIDE_MASTER {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_SLIDE_MASTER.to_string(),
                got: master_type.to_string(),
            });
        }

        // Everything reachable from the master: layouts, theme, media.
        let mut parts = Vec::new();
        let mut seen = HashSet::new();
        let mut pending = vec![master.clone()];
        while let Some(partname) = pending.pop() {
            if !seen.insert(partname.clone()) {
                continue;
            }
            let content_type = reader.content_type(&partname)?.to_string();
            let blob = reader.blob(&partname)?;
            let rels = reader.rels_for(&partname)?;
            for rel in rels.iter().filter(|rel| !rel.is_external()) {
                pending.push(rel.target_partname()?);
            }
            parts.push(BlobPart::with_rels(partname, content_type, blob, rels));
        }
        parts.sort_by(|a, b| a.partname().cmp(b.partname()));

        let master_part = parts
            .iter()
            .find(|part| part.partname() == &master)
            .ok_or_else(|| OoxmlError::PartNotFound(master.to_string()))?;
        let mut layouts = Vec::new();
        for r_id in scan_layout_ids(master_part.blob())? {
            let rel = master_part
                .rels()
                .get(&r_id)
                .ok_or_else(|| OpcError::RelationshipNotFound(r_id.clone()))?;
            layouts.push(rel.target_partname()?);
        }
        let theme = match master_part.rels().part_with_reltype(rt::THEME) {
            Ok(rel) => Some(rel.target_partname()?),
            Err(_) => None,
        };

        debug!(
            master = %master,
            layouts = layouts.len(),
            parts = parts.len(),
            "template loaded"
        );

        Ok(Self {
            parts,
            master,
            master_id: ids.master_id.unwrap_or(DEFAULT_MASTER_ID),
            theme,
            layouts,
            slide_size: ids.size.unwrap_or_default(),
        })
    }

    /// Partname of the layout at `index`.
    pub fn layout(&self, index: usize) -> Option<&PackURI> {
        self.layouts.get(index)
    }

    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn master(&self) -> &PackURI {
        &self.master
    }

    pub(crate) fn master_id(&self) -> u32 {
        self.master_id
    }

    pub fn theme(&self) -> Option<&PackURI> {
        self.theme.as_ref()
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    /// All parts copied into a written package.
    pub fn parts(&self) -> &[BlobPart] {
        &self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::{OpcPackage, PackageWriter};

    #[test]
    fn test_builtin_layouts() {
        let template = Template::builtin().unwrap();
        assert_eq!(template.layout_count(), 2);
        assert_eq!(
            template.layout(0).unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );
        assert_eq!(
            template.layout(1).unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout2.xml"
        );
        assert!(template.layout(2).is_none());
        assert_eq!(template.slide_size(), SlideSize::SCREEN_4X3);
        assert_eq!(template.parts().len(), 4);
    }

    #[test]
    fn test_builtin_master_rels_match_layout_list() {
        let template = Template::builtin().unwrap();
        let master = &template.parts()[0];
        assert_eq!(master.partname(), template.master());

        let r_ids = scan_layout_ids(master.blob()).unwrap();
        let targets: Vec<PackURI> = r_ids
            .iter()
            .map(|r_id| master.rels().get(r_id).unwrap().target_partname().unwrap())
            .collect();
        assert_eq!(targets.iter().collect::<Vec<_>>(), vec![
            template.layout(0).unwrap(),
            template.layout(1).unwrap()
        ]);
        assert_eq!(
            master
                .rels()
                .part_with_reltype(rt::THEME)
                .unwrap()
                .target_ref(),
            "../theme/theme1.xml"
        );
    }

    fn package_with_template(template: &Template, layouts_reversed: bool) -> Vec<u8> {
        let mut pkg = OpcPackage::new();
        let pres_uri = pack_uri("/ppt/presentation.xml").unwrap();
        let mut pres = BlobPart::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, Vec::new());
        let master_rid = pres.relate_to(template.master(), rt::SLIDE_MASTER);
        pres.set_blob(
            format!(
                r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldMasterIdLst><p:sldMasterId id="2147483700" r:id="{}"/></p:sldMasterIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
                master_rid
            )
            .into_bytes(),
        );
        pkg.add_part(Box::new(pres));
        pkg.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);

        for part in template.parts() {
            let mut part = part.clone();
            if layouts_reversed && part.partname() == template.master() {
                let xml = String::from_utf8(part.blob().to_vec())
                    .unwrap()
                    .replace(r#"r:id="rId1""#, r#"r:id="rIdA""#)
                    .replace(r#"r:id="rId2""#, r#"r:id="rId1""#)
                    .replace(r#"r:id="rIdA""#, r#"r:id="rId2""#);
                part.set_blob(xml.into_bytes());
            }
            pkg.add_part(Box::new(part));
        }
        PackageWriter::to_bytes(&pkg).unwrap()
    }

    #[test]
    fn test_from_bytes_reads_master_and_layouts() {
        let builtin = Template::builtin().unwrap();
        let template = Template::from_bytes(package_with_template(&builtin, false)).unwrap();

        assert_eq!(template.master(), builtin.master());
        assert_eq!(template.master_id(), 2_147_483_700);
        assert_eq!(template.layout_count(), 2);
        assert_eq!(template.layout(0), builtin.layout(0));
        assert_eq!(template.theme(), builtin.theme());
        assert_eq!(template.parts().len(), 4);
        assert_eq!(template.slide_size(), SlideSize {
            cx: 12_192_000,
            cy: 6_858_000
        });
    }

    #[test]
    fn test_layout_order_follows_master_list() {
        let builtin = Template::builtin().unwrap();
        let template = Template::from_bytes(package_with_template(&builtin, true)).unwrap();
        assert_eq!(template.layout(0), builtin.layout(1));
        assert_eq!(template.layout(1), builtin.layout(0));
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Template::from_pptx(dir.path().join("missing.pptx")).unwrap_err();
        assert!(matches!(err, OoxmlError::Opc(OpcError::PackageNotFound(_))));
    }

    #[test]
    fn test_not_a_package() {
        assert!(Template::from_bytes(b"plain text".to_vec()).is_err());
    }
}
