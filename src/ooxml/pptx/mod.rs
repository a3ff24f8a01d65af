//! PowerPoint (.pptx) presentation support.
//!
//! Presentations are assembled from a [`Template`] (slide master, slide
//! layouts and theme): each slide is allocated from one of the template's
//! layouts and carries text for the layout's title and body placeholders.
//! Position and styling are inherited from the layout.
//!
//! - [`Template`]: built-in template or the master of an existing `.pptx`
//! - [`MutablePresentation`] / [`MutableSlide`]: slide allocation and serialization
//! - [`DeckReader`]: reads slide text back out of a written file

pub mod layout;
pub(crate) mod parts;
pub mod reader;
pub mod template;
pub mod writer;

pub use layout::{PlaceholderType, SlideLayout};
pub use parts::SlideSize;
pub use reader::{DeckReader, SlideText};
pub use template::Template;
pub use writer::{CoreProperties, MutablePresentation, MutableSlide};
