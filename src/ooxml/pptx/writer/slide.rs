/// Slides allocated from a template layout.
use crate::common::xml::escape_xml_text;
use crate::ooxml::error::Result;
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::layout::{PlaceholderType, SlideLayout};
use std::fmt::Write as FmtWrite;

/// Run properties written on every run and empty paragraph.
const RUN_PROPS: &str = r#"lang="en-US" dirty="0""#;

/// A slide carrying text for its layout's title and body placeholders.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique within the presentation, 256 and up)
    pub(crate) slide_id: u32,
    pub(crate) layout: SlideLayout,
    /// Partname of the template layout this slide was allocated from
    pub(crate) layout_part: PackURI,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32, layout: SlideLayout, layout_part: PackURI) -> Self {
        Self {
            slide_id,
            layout,
            layout_part,
            title: None,
            body: None,
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn layout_part(&self) -> &PackURI {
        &self.layout_part
    }

    /// Set the text of the title placeholder.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the text of the body placeholder (placeholder idx 1).
    ///
    /// Each `\n` starts a new paragraph; a vertical tab becomes a line break
    /// inside the paragraph.
    pub fn set_body(&mut self, body: &str) {
        self.body = Some(body.to_string());
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Generate the slide XML. The layout relationship is carried by the
    /// slide part's rels, so the XML itself references no rIds.
    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        if let Some(ref title) = self.title {
            write_placeholder_shape(
                &mut xml,
                2,
                "Title 1",
                self.layout.title_placeholder(),
                None,
                title,
            )?;
        }

        if let Some(ref body) = self.body {
            let name = match self.layout {
                SlideLayout::Title => "Subtitle 2",
                SlideLayout::TitleAndContent => "Content Placeholder 2",
            };
            write_placeholder_shape(
                &mut xml,
                3,
                name,
                self.layout.body_placeholder(),
                Some(1),
                body,
            )?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

/// Write a placeholder `<p:sp>`. Position and formatting are inherited from
/// the layout, so `spPr` and `bodyPr` stay empty.
fn write_placeholder_shape(
    xml: &mut String,
    shape_id: u32,
    name: &str,
    ph_type: PlaceholderType,
    idx: Option<u32>,
    text: &str,
) -> Result<()> {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, name)?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    write!(xml, "<p:nvPr>{}</p:nvPr>", ph_type.ph_element(idx))?;
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");
    write_paragraphs(xml, text)?;
    xml.push_str("</p:txBody>");

    xml.push_str("</p:sp>");
    Ok(())
}

fn write_paragraphs(xml: &mut String, text: &str) -> Result<()> {
    for paragraph in text.split('\n') {
        xml.push_str("<a:p>");
        if paragraph.is_empty() {
            write!(xml, "<a:endParaRPr {}/>", RUN_PROPS)?;
        } else {
            for (i, line) in paragraph.split('\u{b}').enumerate() {
                if i > 0 {
                    xml.push_str("<a:br/>");
                }
                if !line.is_empty() {
                    write!(
                        xml,
                        "<a:r><a:rPr {}/><a:t>{}</a:t></a:r>",
                        RUN_PROPS,
                        escape_xml_text(line)
                    )?;
                }
            }
        }
        xml.push_str("</a:p>");
    }
    Ok(())
}
