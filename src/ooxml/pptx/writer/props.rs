//! Document properties written to `docProps/core.xml` and `docProps/app.xml`.

use crate::common::xml::escape_xml_text;
use chrono::{DateTime, SecondsFormat, Utc};

/// Name recorded as the producing application.
const APPLICATION: &str = "archdeck";

/// Core properties (`docProps/core.xml`).
#[derive(Debug, Clone)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub creator: Option<String>,
    /// Creation time, also written as the modification time
    pub created: DateTime<Utc>,
}

impl Default for CoreProperties {
    fn default() -> Self {
        Self {
            title: None,
            creator: Some(APPLICATION.to_string()),
            created: Utc::now(),
        }
    }
}

impl CoreProperties {
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(768);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);

        if let Some(ref title) = self.title {
            xml.push_str("<dc:title>");
            xml.push_str(&escape_xml_text(title));
            xml.push_str("</dc:title>");
        }

        if let Some(ref creator) = self.creator {
            xml.push_str("<dc:creator>");
            xml.push_str(&escape_xml_text(creator));
            xml.push_str("</dc:creator>");
            xml.push_str("<cp:lastModifiedBy>");
            xml.push_str(&escape_xml_text(creator));
            xml.push_str("</cp:lastModifiedBy>");
        }

        // W3CDTF, e.g. 2024-01-01T00:00:00Z
        let timestamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        xml.push_str(r#"<dcterms:created xsi:type="dcterms:W3CDTF">"#);
        xml.push_str(&timestamp);
        xml.push_str("</dcterms:created>");
        xml.push_str(r#"<dcterms:modified xsi:type="dcterms:W3CDTF">"#);
        xml.push_str(&timestamp);
        xml.push_str("</dcterms:modified>");

        xml.push_str("</cp:coreProperties>");
        xml
    }
}

/// Extended properties (`docProps/app.xml`) for a deck of `slide_count` slides.
pub(crate) fn app_properties_xml(slide_count: usize) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>{}</Application>",
            "<Slides>{}</Slides>",
            "<Notes>0</Notes>",
            "<HiddenSlides>0</HiddenSlides>",
            "<ScaleCrop>false</ScaleCrop>",
            "<LinksUpToDate>false</LinksUpToDate>",
            "<SharedDoc>false</SharedDoc>",
            "<HyperlinksChanged>false</HyperlinksChanged>",
            "</Properties>"
        ),
        APPLICATION, slide_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_properties_xml() {
        let props = CoreProperties {
            title: Some("Ops & Deploy".to_string()),
            creator: Some("archdeck".to_string()),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        let xml = props.to_xml();
        assert!(xml.contains("<dc:title>Ops &amp; Deploy</dc:title>"));
        assert!(xml.contains("<dc:creator>archdeck</dc:creator>"));
        assert!(xml.contains(">2024-03-01T12:30:00Z</dcterms:created>"));
        assert!(xml.contains(">2024-03-01T12:30:00Z</dcterms:modified>"));
    }

    #[test]
    fn test_app_properties_slide_count() {
        assert!(app_properties_xml(12).contains("<Slides>12</Slides>"));
    }
}
