//! archdeck - builds the microservices architecture slide deck as a
//! PowerPoint (.pptx) file.
//!
//! The crate has three layers:
//!
//! - [`ooxml::opc`]: Open Packaging Conventions container (parts,
//!   relationships, content types, ZIP)
//! - [`ooxml::pptx`]: presentation templates, the slide writer and a reader
//!   for the text of written decks
//! - [`deck`]: the fixed slide content and the build routine behind the
//!   `archdeck` binary
//!
//! # Example
//!
//! ```no_run
//! use archdeck::deck::{BuildConfig, DeckBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::default().with_output("deck.pptx").with_verify(true);
//! let report = DeckBuilder::new(config).build()?;
//! println!("{} slides written to {}", report.slide_count, report.output.display());
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod deck;
pub mod ooxml;
