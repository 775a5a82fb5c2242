//! Command-line front end: summarize a text file or standard input.
//!
//! ```sh
//! rapid-summarize article.txt --ratio 0.2 --max 5
//! curl -s https://example.com/story.txt | rapid-summarize --fast
//! ```

use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use rapid_summarizer::{GeneratorConfig, SummaryGenerator, SummaryKind, SummaryOptions};
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extractive TextRank summaries")]
struct Cli {
    /// Input file (reads standard input when omitted)
    input: Option<PathBuf>,

    /// Fraction of sentences to keep
    #[arg(long, default_value_t = 0.3)]
    ratio: f64,

    /// Minimum number of sentences
    #[arg(long, default_value_t = 3)]
    min: usize,

    /// Maximum number of sentences
    #[arg(long, default_value_t = 7)]
    max: usize,

    /// Positional summary without ranking
    #[arg(long, conflicts_with = "auto")]
    fast: bool,

    /// Sentences requested from the fast path
    #[arg(long, default_value_t = 3)]
    sentences: usize,

    /// Pick ranked or fast summarization by document length
    #[arg(long)]
    auto: bool,

    /// JSON generator config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args, "parsed arguments");

    let config = match &args.config {
        Some(path) => GeneratorConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GeneratorConfig::default(),
    };
    let generator = SummaryGenerator::with_config(config);

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let summary = if args.fast {
        generator.fast_summarize(&text, args.sentences)
    } else if args.auto {
        generator.auto_summarize(&text)
    } else {
        let options = SummaryOptions::new(args.ratio, args.min, args.max);
        let summary = generator.summarize(&text, &options);
        if let SummaryKind::Degraded(err) = &summary.kind {
            info!(error = %err, "printing degraded summary");
        }
        summary.into_text()
    };

    println!("{summary}");
    Ok(())
}
