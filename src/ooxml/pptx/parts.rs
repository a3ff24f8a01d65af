//! Streaming scanners for the PresentationML parts this crate reads.
//!
//! Only the handful of elements needed to load a template or read back a
//! deck are looked at: the master and slide ID lists and slide size of
//! `presentation.xml`, the layout ID list of a slide master, and the text of
//! title and body placeholders on a slide.

use crate::common::xml::{resolve_reference, unescape_xml};
use crate::ooxml::error::Result;
use crate::ooxml::pptx::layout::PlaceholderType;
use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// Slide dimensions in EMUs (914400 EMU = 1 inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

impl SlideSize {
    /// 10" x 7.5", the 4:3 on-screen show size.
    pub const SCREEN_4X3: SlideSize = SlideSize {
        cx: 9_144_000,
        cy: 6_858_000,
    };
}

impl Default for SlideSize {
    fn default() -> Self {
        Self::SCREEN_4X3
    }
}

/// Relationship IDs and size read from `presentation.xml`.
#[derive(Debug, Default)]
pub(crate) struct PresentationIds {
    /// `r:id` of each `p:sldMasterId`, in order (almost always one)
    pub masters: SmallVec<[String; 1]>,
    /// `id` of the first `p:sldMasterId`
    pub master_id: Option<u32>,
    /// `r:id` of each `p:sldId`, in presentation order
    pub slides: Vec<String>,
    /// `p:sldSz`, if present
    pub size: Option<SlideSize>,
}

/// Value of the namespaced `r:id` attribute (any prefix, local name `id`).
fn rel_id_attr(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr: Attribute<'_> = attr?;
        if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Value of an unprefixed attribute.
fn plain_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

pub(crate) fn scan_presentation(xml: &[u8]) -> Result<PresentationIds> {
    let mut ids = PresentationIds::default();
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"sldMasterId" => {
                    if ids.masters.is_empty() {
                        ids.master_id = plain_attr(e, b"id")?.and_then(|v| v.parse().ok());
                    }
                    ids.masters.extend(rel_id_attr(e)?);
                },
                b"sldId" => ids.slides.extend(rel_id_attr(e)?),
                b"sldSz" => {
                    let cx = plain_attr(e, b"cx")?.and_then(|v| v.parse().ok());
                    let cy = plain_attr(e, b"cy")?.and_then(|v| v.parse().ok());
                    if let (Some(cx), Some(cy)) = (cx, cy) {
                        ids.size = Some(SlideSize { cx, cy });
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

/// `r:id` of each `p:sldLayoutId` in a slide master, in gallery order.
pub(crate) fn scan_layout_ids(master_xml: &[u8]) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_reader(master_xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"sldLayoutId" =>
            {
                ids.extend(rel_id_attr(e)?);
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(ids)
}

/// Text of the title and body placeholders of one slide.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderText {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Shape being scanned.
#[derive(Default)]
struct ShapeScan {
    placeholder: Option<(Option<PlaceholderType>, Option<u32>)>,
    paragraphs: Vec<String>,
}

impl ShapeScan {
    fn push_text(&mut self, text: &str) {
        match self.paragraphs.last_mut() {
            Some(paragraph) => paragraph.push_str(text),
            None => self.paragraphs.push(text.to_string()),
        }
    }
}

/// Collect placeholder text from slide XML.
///
/// Paragraphs are joined with `\n` and `<a:br/>` becomes a vertical tab, so
/// text written by [`MutableSlide`](crate::ooxml::pptx::MutableSlide) reads
/// back unchanged. The title comes from the `title`/`ctrTitle` placeholder,
/// the body from the non-title placeholder with `idx="1"`.
pub(crate) fn scan_slide_text(slide_xml: &[u8]) -> Result<PlaceholderText> {
    let mut found = PlaceholderText::default();
    let mut reader = Reader::from_reader(slide_xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut shape: Option<ShapeScan> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"sp" => shape = Some(ShapeScan::default()),
                b"ph" => record_placeholder(&mut shape, e)?,
                b"p" => {
                    if let Some(shape) = shape.as_mut() {
                        shape.paragraphs.push(String::new());
                    }
                },
                b"t" => in_text = shape.is_some(),
                _ => {},
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"ph" => record_placeholder(&mut shape, e)?,
                b"p" => {
                    if let Some(shape) = shape.as_mut() {
                        shape.paragraphs.push(String::new());
                    }
                },
                b"br" => {
                    if let Some(shape) = shape.as_mut() {
                        shape.push_text("\u{b}");
                    }
                },
                _ => {},
            },
            Event::Text(ref t) if in_text => {
                if let Some(shape) = shape.as_mut() {
                    let raw = std::str::from_utf8(t)?;
                    shape.push_text(&unescape_xml(raw));
                }
            },
            Event::GeneralRef(ref r) if in_text => {
                if let Some(shape) = shape.as_mut() {
                    let name = std::str::from_utf8(r)?;
                    match resolve_reference(name) {
                        Some(c) => shape.push_text(c.encode_utf8(&mut [0u8; 4])),
                        None => shape.push_text(&format!("&{};", name)),
                    }
                }
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"sp" => {
                    if let Some(done) = shape.take() {
                        assign_placeholder_text(&mut found, done);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(found)
}

fn record_placeholder(shape: &mut Option<ShapeScan>, e: &BytesStart<'_>) -> Result<()> {
    if let Some(shape) = shape.as_mut() {
        let ph_type = PlaceholderType::from_attr(plain_attr(e, b"type")?.as_deref());
        let idx = plain_attr(e, b"idx")?.and_then(|v| v.parse().ok());
        shape.placeholder = Some((ph_type, idx));
    }
    Ok(())
}

fn assign_placeholder_text(found: &mut PlaceholderText, shape: ShapeScan) {
    let Some((ph_type, idx)) = shape.placeholder else {
        return;
    };
    let text = shape.paragraphs.join("\n");

    match ph_type {
        Some(t) if t.is_title() => {
            found.title.get_or_insert(text);
        },
        Some(_) if idx == Some(1) => {
            found.body.get_or_insert(text);
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_presentation() {
        let xml = br#"<p:presentation xmlns:p="p" xmlns:r="r">
<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>
<p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId2"/></p:sldIdLst>
<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/>
</p:presentation>"#;
        let ids = scan_presentation(xml).unwrap();
        assert_eq!(ids.masters.as_slice(), ["rId1"]);
        assert_eq!(ids.master_id, Some(2_147_483_648));
        assert_eq!(ids.slides, vec!["rId3", "rId2"]);
        assert_eq!(
            ids.size,
            Some(SlideSize {
                cx: 12_192_000,
                cy: 6_858_000
            })
        );
    }

    #[test]
    fn test_scan_layout_ids() {
        let xml = br#"<p:sldMaster xmlns:p="p" xmlns:r="r"><p:sldLayoutIdLst>
<p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/>
</p:sldLayoutIdLst></p:sldMaster>"#;
        assert_eq!(scan_layout_ids(xml).unwrap(), vec!["rId1", "rId2"]);
    }

    #[test]
    fn test_scan_slide_text() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
<p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>Infrastructure &amp; Automation</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:txBody><a:p><a:r><a:t>Auth API (Go) </a:t></a:r></a:p><a:p><a:endParaRPr/></a:p><a:p><a:r><a:t>HTTP → HTTPS</a:t></a:r></a:p></p:txBody></p:sp>
<p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr><p:txBody><a:p><a:r><a:t>ignored</a:t></a:r></a:p></p:txBody></p:sp>
</p:spTree></p:cSld></p:sld>"#;
        let text = scan_slide_text(xml.as_bytes()).unwrap();
        assert_eq!(text.title.as_deref(), Some("Infrastructure & Automation"));
        assert_eq!(text.body.as_deref(), Some("Auth API (Go) \n\nHTTP → HTTPS"));
    }

    #[test]
    fn test_scan_slide_without_placeholders() {
        let xml = br#"<p:sld xmlns:p="p"><p:cSld><p:spTree/></p:cSld></p:sld>"#;
        assert_eq!(scan_slide_text(xml).unwrap(), PlaceholderText::default());
    }
}
