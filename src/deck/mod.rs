//! The microservices architecture deck.
//!
//! [`DeckBuilder`] allocates one slide per [`SlideRecord`] of [`DECK`] from
//! the configured template and writes the presentation in a single call.

pub mod builder;
pub mod config;
pub mod content;
pub mod error;
pub mod outline;

pub use builder::{BuildReport, DeckBuilder, verify_deck};
pub use config::{BuildConfig, DEFAULT_OUTPUT, OUTLINE_FILE, TemplateSource};
pub use content::{DECK, DECK_TITLE, SlideRecord};
pub use error::DeckError;
pub use outline::{render_outline, write_outline};
