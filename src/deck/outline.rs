//! Markdown outline of the deck.
//!
//! The outline carries the same text as the slides so the deck can be
//! recreated by hand when the `.pptx` cannot be produced.

use crate::deck::content::{DECK_TITLE, SlideRecord};
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// One `## N. Title` section per slide, followed by its layout and body.
pub fn render_outline(deck: &[SlideRecord]) -> String {
    let mut out = String::with_capacity(8192);
    let _ = writeln!(out, "# {}\n", DECK_TITLE);

    for (index, record) in deck.iter().enumerate() {
        let _ = writeln!(out, "## {}. {}\n", index + 1, record.title);
        let _ = writeln!(out, "_Layout: {}_\n", record.layout.name());
        let _ = writeln!(out, "{}\n", record.body);
    }

    out
}

pub fn write_outline<P: AsRef<Path>>(path: P, deck: &[SlideRecord]) -> std::io::Result<()> {
    std::fs::write(path, render_outline(deck))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::content::DECK;

    #[test]
    fn test_outline_sections() {
        let outline = render_outline(&DECK);
        assert!(outline.starts_with("# Microservices TODO Application\n\n"));
        assert_eq!(outline.matches("\n## ").count(), 12);
        assert!(outline.contains("## 1. Microservices TODO Application\n\n_Layout: Title Slide_"));
        assert!(outline.contains("## 12. Live Demonstration & Questions\n\n_Layout: Title and Content_"));
        for record in DECK.iter() {
            assert!(outline.contains(record.body));
        }
    }

    #[test]
    fn test_write_outline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outline.md");
        write_outline(&path, &DECK[..2]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("## 2. System Architecture Overview"));
        assert!(!text.contains("## 3."));
    }
}
