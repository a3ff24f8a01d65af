//! Build settings for one run.

use std::path::PathBuf;

/// Output file written when no path is given.
pub const DEFAULT_OUTPUT: &str = "microservice-arch.pptx";

/// Outline document the error report points to, for recreating the deck by hand.
pub const OUTLINE_FILE: &str = "microservice-arch-outline.txt";

/// Where slide masters and layouts come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// The template compiled into the binary
    #[default]
    Builtin,
    /// The first slide master of an existing `.pptx`
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub output: PathBuf,
    pub template: TemplateSource,
    /// Also write the outline document here
    pub outline: Option<PathBuf>,
    /// Re-open the written file and compare it with the deck
    pub verify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            template: TemplateSource::Builtin,
            outline: None,
            verify: false,
        }
    }
}

impl BuildConfig {
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    pub fn with_outline(mut self, outline: impl Into<PathBuf>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reproduces_plain_run() {
        let config = BuildConfig::default();
        assert_eq!(config.output, PathBuf::from("microservice-arch.pptx"));
        assert_eq!(config.template, TemplateSource::Builtin);
        assert!(config.outline.is_none());
        assert!(!config.verify);
        assert_eq!(OUTLINE_FILE, "microservice-arch-outline.txt");
    }
}
