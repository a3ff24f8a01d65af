//! Command-line entry point: builds the microservices architecture deck.
//!
//! ```sh
//! archdeck                                  # writes microservice-arch.pptx
//! archdeck -o deck.pptx --template corp.pptx --verify
//! archdeck --outline microservice-arch-outline.txt
//! ```
//!
//! Messages for the user go to stdout, logs (`RUST_LOG`) to stderr. The exit
//! status is 0 whether or not the deck was written.

use archdeck::deck::{BuildConfig, DEFAULT_OUTPUT, DeckBuilder, TemplateSource};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the microservices architecture slide deck
#[derive(Parser, Debug)]
#[command(
    name = "archdeck",
    about = "Build the microservices architecture slide deck as a .pptx file",
    version
)]
struct Args {
    /// Output presentation
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Take the slide master and layouts from an existing .pptx
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Also write the deck as a plain-text outline
    #[arg(long, value_name = "PATH")]
    outline: Option<PathBuf>,

    /// Re-open the written file and check it against the deck
    #[arg(long)]
    verify: bool,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for BuildConfig {
    fn from(args: Args) -> Self {
        let template = match args.template {
            Some(path) => TemplateSource::File(path),
            None => TemplateSource::Builtin,
        };
        BuildConfig {
            output: args.output,
            template,
            outline: args.outline,
            verify: args.verify,
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "archdeck=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let builder = DeckBuilder::new(args.into());
    match builder.build() {
        Ok(report) => {
            println!("PowerPoint presentation created: {}", report.output.display());
            if let Some(outline) = report.outline {
                println!("Outline written: {}", outline.display());
            }
            if report.verified {
                println!("Verified {} slides", report.slide_count);
            }
        },
        Err(err) => {
            tracing::debug!(error = ?err, "build failed");
            println!("{}", err.report());
        },
    }
}
