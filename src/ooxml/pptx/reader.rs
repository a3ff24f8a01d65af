//! Read back the slide text of a written presentation.
//!
//! [`DeckReader`] walks `p:sldIdLst` in order and, for each slide, resolves
//! the layout the slide was allocated from and collects the text of its
//! title and body placeholders.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{PackURI, PackageReader};
use crate::ooxml::pptx::layout::SlideLayout;
use crate::ooxml::pptx::parts::{scan_layout_ids, scan_presentation, scan_slide_text};
use std::path::Path;

/// Text content of one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideText {
    pub partname: PackURI,
    /// Position of the slide's layout in the master's layout list
    pub layout_index: Option<usize>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl SlideText {
    /// The layout, if it is one of the layouts this crate writes.
    pub fn layout(&self) -> Option<SlideLayout> {
        self.layout_index.and_then(SlideLayout::from_index)
    }
}

/// Slides of a `.pptx` file in presentation order.
#[derive(Debug)]
pub struct DeckReader {
    slides: Vec<SlideText>,
}

impl DeckReader {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(PackageReader::open(path)?)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(PackageReader::from_bytes(data)?)
    }

    fn from_reader(mut reader: PackageReader) -> Result<Self> {
        let main = reader.main_document_partname()?;
        let ids = scan_presentation(&reader.blob(&main)?)?;
        let pres_rels = reader.rels_for(&main)?;

        // Layout order of the first master; slides from other masters get no
        // layout index.
        let mut layouts = Vec::new();
        if let Some(master_rid) = ids.masters.first() {
            let master = pres_rels
                .get(master_rid)
                .ok_or_else(|| OpcError::RelationshipNotFound(master_rid.clone()))?
                .target_partname()?;
            let master_rels = reader.rels_for(&master)?;
            for r_id in scan_layout_ids(&reader.blob(&master)?)? {
                if let Some(rel) = master_rels.get(&r_id) {
                    layouts.push(rel.target_partname()?);
                }
            }
        }

        let mut slides = Vec::with_capacity(ids.slides.len());
        for r_id in &ids.slides {
            let partname = pres_rels
                .get(r_id)
                .ok_or_else(|| OpcError::RelationshipNotFound(r_id.clone()))?
                .target_partname()?;

            let slide_rels = reader.rels_for(&partname)?;
            let layout_index = match slide_rels.part_with_reltype(rt::SLIDE_LAYOUT) {
                Ok(rel) => {
                    let layout = rel.target_partname()?;
                    layouts.iter().position(|l| *l == layout)
                },
                Err(_) => None,
            };

            let text = scan_slide_text(&reader.blob(&partname)?)?;
            slides.push(SlideText {
                partname,
                layout_index,
                title: text.title,
                body: text.body,
            });
        }

        Ok(Self { slides })
    }

    pub fn slides(&self) -> &[SlideText] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide at `index`, or an error naming the missing slide.
    pub fn slide(&self, index: usize) -> Result<&SlideText> {
        self.slides
            .get(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("slide {}", index + 1)))
    }
}
