//! XML text helpers shared by the package writer and readers.

mod escape;

pub use escape::{escape_xml, escape_xml_text, is_xml_char, resolve_reference, unescape_xml};
