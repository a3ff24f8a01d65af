//! Builds the deck and writes it to disk.

use crate::deck::config::{BuildConfig, TemplateSource};
use crate::deck::content::{DECK, DECK_TITLE, SlideRecord};
use crate::deck::error::{DeckError, Result};
use crate::deck::outline::write_outline;
use crate::ooxml::OoxmlError;
use crate::ooxml::pptx::{DeckReader, MutablePresentation, Template};
use std::path::{Path, PathBuf};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub slide_count: usize,
    pub bytes_written: usize,
    pub outline: Option<PathBuf>,
    pub verified: bool,
}

/// Builds the fixed deck with the settings of one run.
#[derive(Debug)]
pub struct DeckBuilder {
    config: BuildConfig,
    deck: &'static [SlideRecord],
}

impl DeckBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config, deck: &DECK }
    }

    /// Load the configured template and check it has every layout the deck
    /// allocates slides from.
    pub fn resolve_template(&self) -> Result<Template> {
        let (name, loaded) = match &self.config.template {
            TemplateSource::Builtin => ("built-in".to_string(), Template::builtin()),
            TemplateSource::File(path) => {
                (path.display().to_string(), Template::from_pptx(path))
            },
        };
        let template = loaded.map_err(|source| DeckError::DependencyMissing {
            template: name.clone(),
            source,
        })?;

        let needed = self
            .deck
            .iter()
            .map(|record| record.layout.index() + 1)
            .max()
            .unwrap_or(0);
        if template.layout_count() < needed {
            return Err(DeckError::DependencyMissing {
                template: name,
                source: OoxmlError::LayoutNotFound {
                    index: needed - 1,
                    available: template.layout_count(),
                },
            });
        }

        tracing::debug!(
            template = %name,
            layouts = template.layout_count(),
            "template resolved"
        );
        Ok(template)
    }

    /// Build the presentation and write it to the output path, replacing any
    /// existing file. Nothing is written until every slide has been added.
    ///
    /// A requested outline is written first, so it exists even when the
    /// presentation itself cannot be produced.
    pub fn build(&self) -> Result<BuildReport> {
        if let Some(outline) = &self.config.outline {
            write_outline(outline, self.deck).map_err(|source| DeckError::WriteError {
                path: outline.clone(),
                source,
            })?;
            tracing::info!(path = %outline.display(), "outline written");
        }

        let template = self.resolve_template()?;
        let mut pres = MutablePresentation::from_template(template);
        pres.set_title(DECK_TITLE);

        for (index, record) in self.deck.iter().enumerate() {
            tracing::debug!(
                slide = index + 1,
                layout = record.layout.name(),
                title = record.title,
                "adding slide"
            );
            let slide = pres.add_slide(record.layout)?;
            slide.set_title(record.title);
            slide.set_body(record.body);
        }

        let bytes = pres.to_bytes()?;
        let output = self.config.output.clone();
        std::fs::write(&output, &bytes).map_err(|source| DeckError::WriteError {
            path: output.clone(),
            source,
        })?;
        tracing::info!(
            path = %output.display(),
            slides = pres.slide_count(),
            bytes = bytes.len(),
            "presentation saved"
        );

        if self.config.verify {
            verify_deck(&output, self.deck)?;
        }

        Ok(BuildReport {
            output,
            slide_count: pres.slide_count(),
            bytes_written: bytes.len(),
            outline: self.config.outline.clone(),
            verified: self.config.verify,
        })
    }
}

/// Re-open `path` and check slide count, layouts and text against `deck`.
pub fn verify_deck(path: &Path, deck: &[SlideRecord]) -> Result<()> {
    let failed = |reason: String| DeckError::VerificationFailed {
        path: path.to_path_buf(),
        reason,
    };

    let reader = DeckReader::open(path)?;
    if reader.slide_count() != deck.len() {
        return Err(failed(format!(
            "expected {} slides, found {}",
            deck.len(),
            reader.slide_count()
        )));
    }

    for (index, (slide, record)) in reader.slides().iter().zip(deck).enumerate() {
        let number = index + 1;
        if slide.layout() != Some(record.layout) {
            return Err(failed(format!(
                "slide {} uses layout {:?}, expected {}",
                number,
                slide.layout_index,
                record.layout.index()
            )));
        }
        if slide.title.as_deref() != Some(record.title) {
            return Err(failed(format!("slide {} title differs", number)));
        }
        if slide.body.as_deref() != Some(record.body) {
            return Err(failed(format!("slide {} body differs", number)));
        }
    }

    tracing::info!(path = %path.display(), slides = deck.len(), "deck verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::config::OUTLINE_FILE;
    use crate::deck::outline::render_outline;
    use crate::ooxml::pptx::SlideLayout;

    fn config_in(dir: &Path) -> BuildConfig {
        BuildConfig::default().with_output(dir.join("microservice-arch.pptx"))
    }

    #[test]
    fn test_build_writes_full_deck() {
        let dir = tempfile::tempdir().unwrap();
        let report = DeckBuilder::new(config_in(dir.path())).build().unwrap();
        assert_eq!(report.slide_count, 12);
        assert!(report.bytes_written > 0);
        assert!(!report.verified);

        let reader = DeckReader::open(&report.output).unwrap();
        assert_eq!(reader.slide_count(), 12);
        assert_eq!(reader.slides()[0].layout(), Some(SlideLayout::Title));
        for slide in &reader.slides()[1..] {
            assert_eq!(slide.layout_index, Some(1));
        }
        for (slide, record) in reader.slides().iter().zip(DECK.iter()) {
            assert_eq!(slide.title.as_deref(), Some(record.title));
            assert_eq!(slide.body.as_deref(), Some(record.body));
        }
    }

    #[test]
    fn test_build_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.output, b"not a presentation").unwrap();

        let report = DeckBuilder::new(config.clone()).build().unwrap();
        verify_deck(&report.output, &DECK).unwrap();

        let again = DeckBuilder::new(config).build().unwrap();
        assert_eq!(again.output, report.output);
        verify_deck(&again.output, &DECK).unwrap();
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path())
            .with_template(TemplateSource::File(dir.path().join("absent.pptx")));
        let output = config.output.clone();

        let err = DeckBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, DeckError::DependencyMissing { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_unusable_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("broken.pptx");
        std::fs::write(&template, b"plain text, not a zip").unwrap();
        let config = config_in(dir.path()).with_template(TemplateSource::File(template));
        let output = config.output.clone();

        let err = DeckBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, DeckError::DependencyMissing { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default()
            .with_output(dir.path().join("no-such-dir").join("deck.pptx"));

        match DeckBuilder::new(config).build() {
            Err(DeckError::WriteError { path, .. }) => {
                assert!(path.ends_with("no-such-dir/deck.pptx"));
            },
            other => panic!("expected WriteError, got {:?}", other),
        }
    }

    #[test]
    fn test_outline_survives_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let outline = dir.path().join(OUTLINE_FILE);
        let config = BuildConfig::default()
            .with_output(dir.path().join("missing-dir").join("deck.pptx"))
            .with_outline(&outline);

        let err = DeckBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, DeckError::WriteError { .. }));
        assert!(err.report().contains(OUTLINE_FILE));
        let text = std::fs::read_to_string(&outline).unwrap();
        assert_eq!(text, render_outline(&DECK));
    }

    #[test]
    fn test_outline_written_when_template_missing() {
        let dir = tempfile::tempdir().unwrap();
        let outline = dir.path().join(OUTLINE_FILE);
        let config = config_in(dir.path())
            .with_template(TemplateSource::File(dir.path().join("absent.pptx")))
            .with_outline(&outline);
        let output = config.output.clone();

        let err = DeckBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, DeckError::DependencyMissing { .. }));
        assert!(!output.exists());
        assert!(outline.exists());
    }

    #[test]
    fn test_generated_deck_as_template() {
        let dir = tempfile::tempdir().unwrap();
        let first = DeckBuilder::new(config_in(dir.path())).build().unwrap();

        let config = BuildConfig::default()
            .with_output(dir.path().join("second.pptx"))
            .with_template(TemplateSource::File(first.output.clone()))
            .with_verify(true);
        let report = DeckBuilder::new(config).build().unwrap();
        assert!(report.verified);
        assert_eq!(report.slide_count, 12);
    }

    #[test]
    fn test_outline_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let outline = dir.path().join("microservice-arch-outline.txt");
        let config = config_in(dir.path())
            .with_outline(&outline)
            .with_verify(true);

        let report = DeckBuilder::new(config).build().unwrap();
        assert!(report.verified);
        assert_eq!(report.outline.as_deref(), Some(outline.as_path()));
        let text = std::fs::read_to_string(&outline).unwrap();
        assert!(text.contains("## 8. Drift Detection & Safety Mechanism"));
    }

    #[test]
    fn test_verify_detects_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let report = DeckBuilder::new(config_in(dir.path())).build().unwrap();

        let err = verify_deck(&report.output, &DECK[..3]).unwrap_err();
        assert!(matches!(err, DeckError::VerificationFailed { .. }));
    }
}
