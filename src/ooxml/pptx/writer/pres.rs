/// Presentation writer for PPTX.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{BlobPart, OpcPackage, PackURI, PackageWriter, Part};
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::template::{
    Template, default_pres_props_xml, default_table_styles_xml, default_view_props_xml,
};
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;
use std::path::Path;
use tracing::debug;

use super::props::{CoreProperties, app_properties_xml};
use super::slide::MutableSlide;

/// First `p:sldId/@id`; lower values are reserved.
const FIRST_SLIDE_ID: u32 = 256;

fn pack_uri(uri: impl Into<String>) -> Result<PackURI> {
    Ok(PackURI::new(uri).map_err(OpcError::InvalidPackUri)?)
}

/// A PowerPoint presentation being assembled from a template.
///
/// Slides are allocated from the template's layouts and kept in memory; the
/// package is only serialized by [`to_bytes`](Self::to_bytes) or
/// [`save`](Self::save).
#[derive(Debug)]
pub struct MutablePresentation {
    template: Template,
    /// Slides in display order
    pub(crate) slides: Vec<MutableSlide>,
    properties: CoreProperties,
}

impl MutablePresentation {
    /// Create an empty presentation that allocates slides from `template`.
    pub fn from_template(template: Template) -> Self {
        Self {
            template,
            slides: Vec::new(),
            properties: CoreProperties::default(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Append a slide using `layout`.
    ///
    /// Fails with [`OoxmlError::LayoutNotFound`] when the template has no
    /// layout at `layout.index()`.
    pub fn add_slide(&mut self, layout: SlideLayout) -> Result<&mut MutableSlide> {
        let layout_part = self
            .template
            .layout(layout.index())
            .cloned()
            .ok_or(OoxmlError::LayoutNotFound {
                index: layout.index(),
                available: self.template.layout_count(),
            })?;

        let index = self.slides.len();
        let slide_id = FIRST_SLIDE_ID + index as u32;
        self.slides
            .push(MutableSlide::new(slide_id, layout, layout_part));
        Ok(&mut self.slides[index])
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide at `index` (0-based).
    pub fn slide(&self, index: usize) -> Option<&MutableSlide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Set the document title recorded in the core properties.
    pub fn set_title(&mut self, title: &str) {
        self.properties.title = Some(title.to_string());
    }

    /// Set the author recorded in the core properties.
    pub fn set_creator(&mut self, creator: &str) {
        self.properties.creator = Some(creator.to_string());
    }

    /// Set the creation timestamp (defaults to the time the presentation
    /// was created).
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.properties.created = created;
    }

    /// Assemble the OPC package: template parts, presentation, slides and
    /// document properties.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let mut package = OpcPackage::new();

        for part in self.template.parts() {
            package.add_part(Box::new(part.clone()));
        }

        let pres_uri = pack_uri("/ppt/presentation.xml")?;
        let mut pres = BlobPart::new(pres_uri.clone(), ct::PML_PRESENTATION_MAIN, Vec::new());
        let master_rid = pres.relate_to(self.template.master(), rt::SLIDE_MASTER);

        let mut slide_rids = Vec::with_capacity(self.slides.len());
        for (index, slide) in self.slides.iter().enumerate() {
            let slide_uri = pack_uri(format!("/ppt/slides/slide{}.xml", index + 1))?;
            let mut part = BlobPart::new(slide_uri.clone(), ct::PML_SLIDE, Vec::new());
            part.relate_to(slide.layout_part(), rt::SLIDE_LAYOUT);
            part.set_blob(slide.to_xml()?.into_bytes());
            package.add_part(Box::new(part));

            slide_rids.push(pres.relate_to(&slide_uri, rt::SLIDE));
        }

        for (uri, content_type, reltype, xml) in [
            (
                "/ppt/presProps.xml",
                ct::PML_PRES_PROPS,
                rt::PRES_PROPS,
                default_pres_props_xml(),
            ),
            (
                "/ppt/viewProps.xml",
                ct::PML_VIEW_PROPS,
                rt::VIEW_PROPS,
                default_view_props_xml(),
            ),
            (
                "/ppt/tableStyles.xml",
                ct::DML_TABLE_STYLES,
                rt::TABLE_STYLES,
                default_table_styles_xml(),
            ),
        ] {
            let uri = pack_uri(uri)?;
            pres.relate_to(&uri, reltype);
            package.add_part(Box::new(BlobPart::new(
                uri,
                content_type,
                xml.as_bytes().to_vec(),
            )));
        }

        if let Some(theme) = self.template.theme() {
            pres.relate_to(theme, rt::THEME);
        }

        pres.set_blob(
            self.generate_presentation_xml(&master_rid, &slide_rids)?
                .into_bytes(),
        );
        package.add_part(Box::new(pres));
        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);

        let core_uri = pack_uri("/docProps/core.xml")?;
        package.add_part(Box::new(BlobPart::new(
            core_uri.clone(),
            ct::OPC_CORE_PROPERTIES,
            self.properties.to_xml().into_bytes(),
        )));
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);

        let app_uri = pack_uri("/docProps/app.xml")?;
        package.add_part(Box::new(BlobPart::new(
            app_uri.clone(),
            ct::OFC_EXTENDED_PROPERTIES,
            app_properties_xml(self.slides.len()).into_bytes(),
        )));
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        Ok(package)
    }

    /// Serialize the presentation to `.pptx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        debug!(
            parts = package.part_count(),
            slides = self.slides.len(),
            "serializing presentation"
        );
        Ok(PackageWriter::to_bytes(&package)?)
    }

    /// Serialize and write to `path` in one call, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Generate presentation.xml content with the relationship IDs assigned
    /// in [`to_package`](Self::to_package).
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rid: &str,
        slide_rids: &[String],
    ) -> Result<String> {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="{}" r:id="{}"/>"#,
            self.template.master_id(),
            master_rid
        )?;
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, r_id) in self.slides.iter().zip(slide_rids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    r_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        let size = self.template.slide_size();
        write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, size.cx, size.cy)?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::PackageReader;

    fn presentation() -> MutablePresentation {
        MutablePresentation::from_template(Template::builtin().unwrap())
    }

    #[test]
    fn test_create_presentation() {
        let pres = presentation();
        assert_eq!(pres.slide_count(), 0);
        assert!(pres.slide(0).is_none());
    }

    #[test]
    fn test_add_slide() {
        let mut pres = presentation();
        let slide = pres.add_slide(SlideLayout::Title).unwrap();
        slide.set_title("Test Title");
        assert_eq!(slide.slide_id(), 256);

        let slide = pres.add_slide(SlideLayout::TitleAndContent).unwrap();
        assert_eq!(slide.slide_id(), 257);
        assert_eq!(
            slide.layout_part().as_str(),
            "/ppt/slideLayouts/slideLayout2.xml"
        );

        assert_eq!(pres.slide_count(), 2);
        assert_eq!(pres.slide(0).unwrap().title(), Some("Test Title"));
    }

    #[test]
    fn test_xml_generation() {
        let mut pres = presentation();
        pres.add_slide(SlideLayout::Title).unwrap().set_title("Test");

        let xml = pres
            .generate_presentation_xml("rId1", &["rId2".to_string()])
            .unwrap();
        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_package_parts() {
        let mut pres = presentation();
        pres.add_slide(SlideLayout::Title).unwrap().set_title("One");
        pres.add_slide(SlideLayout::TitleAndContent)
            .unwrap()
            .set_title("Two");

        let package = pres.to_package().unwrap();
        for partname in [
            "/ppt/presentation.xml",
            "/ppt/slides/slide1.xml",
            "/ppt/slides/slide2.xml",
            "/ppt/slideMasters/slideMaster1.xml",
            "/ppt/slideLayouts/slideLayout2.xml",
            "/ppt/theme/theme1.xml",
            "/ppt/presProps.xml",
            "/ppt/viewProps.xml",
            "/ppt/tableStyles.xml",
            "/docProps/core.xml",
            "/docProps/app.xml",
        ] {
            assert!(
                package.contains_part(&PackURI::new(partname).unwrap()),
                "missing {}",
                partname
            );
        }

        let slide2 = package
            .get_part(&PackURI::new("/ppt/slides/slide2.xml").unwrap())
            .unwrap();
        let layout_rel = slide2.rels().part_with_reltype(rt::SLIDE_LAYOUT).unwrap();
        assert_eq!(layout_rel.target_ref(), "../slideLayouts/slideLayout2.xml");
    }

    #[test]
    fn test_save_writes_readable_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let mut pres = presentation();
        pres.set_title("Deck");
        pres.add_slide(SlideLayout::Title).unwrap().set_title("Hello");
        pres.save(&path).unwrap();

        let mut reader = PackageReader::open(&path).unwrap();
        let main = reader.main_document_partname().unwrap();
        assert_eq!(main.as_str(), "/ppt/presentation.xml");
        assert_eq!(
            reader.content_type(&main).unwrap(),
            ct::PML_PRESENTATION_MAIN
        );
    }

    #[test]
    fn test_missing_layout() {
        let bytes = strip_second_layout(presentation().to_bytes().unwrap());
        let template = Template::from_bytes(bytes).unwrap();
        assert_eq!(template.layout_count(), 1);

        let mut pres = MutablePresentation::from_template(template);
        assert!(matches!(
            pres.add_slide(SlideLayout::TitleAndContent),
            Err(OoxmlError::LayoutNotFound {
                index: 1,
                available: 1
            })
        ));
    }

    /// Rewrite the master of a written deck so it lists only its first layout.
    fn strip_second_layout(bytes: Vec<u8>) -> Vec<u8> {
        let mut reader = PackageReader::from_bytes(bytes).unwrap();
        let mut package = OpcPackage::new();
        for partname in reader.partnames() {
            let content_type = reader.content_type(&partname).unwrap().to_string();
            let mut blob = reader.blob(&partname).unwrap();
            let rels = reader.rels_for(&partname).unwrap();
            if content_type == ct::PML_SLIDE_MASTER {
                blob = String::from_utf8(blob)
                    .unwrap()
                    .replace(r#"<p:sldLayoutId id="2147483650" r:id="rId2"/>"#, "")
                    .into_bytes();
            }
            package.add_part(Box::new(BlobPart::with_rels(
                partname,
                content_type,
                blob,
                rels,
            )));
        }
        let pres_uri = PackURI::new("/ppt/presentation.xml").unwrap();
        package.relate_to(&pres_uri, rt::OFFICE_DOCUMENT);
        PackageWriter::to_bytes(&package).unwrap()
    }
}
