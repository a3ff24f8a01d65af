//! Errors reported to the user at the end of a run.

use crate::deck::config::OUTLINE_FILE;
use crate::ooxml::OoxmlError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Error, Debug)]
pub enum DeckError {
    /// The presentation template could not be loaded; nothing was written.
    #[error("presentation template '{template}' unavailable: {source}")]
    DependencyMissing {
        template: String,
        #[source]
        source: OoxmlError,
    },

    /// A file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The written file does not hold the deck.
    #[error("verification of {} failed: {reason}", .path.display())]
    VerificationFailed { path: PathBuf, reason: String },

    /// Any other failure while assembling the presentation.
    #[error(transparent)]
    GenericFailure(#[from] OoxmlError),
}

impl DeckError {
    /// The message printed for this error.
    pub fn report(&self) -> String {
        match self {
            DeckError::DependencyMissing { .. } => format!(
                "Error: {}.\n\
                 Pass a readable .pptx with --template, or drop --template to use the built-in one.\n\
                 Then run this command again.",
                self
            ),
            _ => format!(
                "Error creating presentation: {}\n\
                 The slide text can be written to {} with --outline to recreate the deck manually.",
                self, OUTLINE_FILE
            ),
        }
    }
}
