//! Mutable presentation writer components for PPTX.

pub mod pres;
pub mod props;
pub mod slide;

// Re-export main types
pub use pres::MutablePresentation;
pub use props::CoreProperties;
pub use slide::MutableSlide;
