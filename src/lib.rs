//! # rapid-summarizer
//!
//! Extractive summaries via TextRank over sentence-similarity graphs.
//!
//! Sentences are compared by the Jaccard overlap of their content words,
//! ranked by PageRank centrality, and the top few are returned in the order
//! they appear in the document.
//!
//! ```rust,no_run
//! use rapid_summarizer::SummaryGenerator;
//!
//! # fn main() -> std::io::Result<()> {
//! let generator = SummaryGenerator::new();
//! let article = std::fs::read_to_string("article.txt")?;
//! println!("{}", generator.generate_summary(&article, 0.3, 3, 7));
//! # Ok(())
//! # }
//! ```
//!
//! Long documents are handled with two approximations: beyond 200 sentences
//! only every 2nd (or, beyond 500, every 5th) sentence is ranked, and beyond
//! 100 sentences only pairs within 50 positions of each other are compared.

pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod summarizer;
pub mod types;

pub use errors::SummaryError;
pub use summarizer::cache::{CacheStats, SummaryCache};
pub use summarizer::generator::SummaryGenerator;
pub use types::{CacheKeyStrategy, GeneratorConfig, Summary, SummaryKind, SummaryOptions};
