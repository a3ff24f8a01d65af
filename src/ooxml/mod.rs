//! Office Open XML (OOXML) support for writing PowerPoint presentations.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships, content types)
//! 2. **PresentationML** (`pptx`): templates, the mutable presentation writer and a
//!    reader for the text of generated decks
//!
//! # Example
//!
//! ```rust,no_run
//! use archdeck::ooxml::pptx::{MutablePresentation, SlideLayout, Template};
//!
//! let mut pres = MutablePresentation::from_template(Template::builtin()?);
//! let slide = pres.add_slide(SlideLayout::Title)?;
//! slide.set_title("Hello");
//! slide.set_body("World");
//! pres.save("hello.pptx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
