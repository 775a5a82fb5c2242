//! Core types shared across the summarizer
//!
//! Sentences, per-call options, generator configuration and the typed
//! summary result.

use serde::{Deserialize, Serialize};

use crate::errors::SummaryError;

/// A sentence of the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Sentence text as it appears in the document
    pub text: String,
    /// Position in the original (pre-downsampling) tokenization
    pub index: usize,
    /// Centrality score, filled in by ranking
    pub score: f64,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
            score: 0.0,
        }
    }

    /// Number the sentences of a tokenization in document order.
    pub fn from_texts(texts: Vec<String>) -> Vec<Sentence> {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Sentence::new(text, index))
            .collect()
    }
}

/// Per-call selection parameters for ranked summaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Fraction of the ranked sentences to keep
    pub ratio: f64,
    /// Lower bound on the number of sentences returned
    pub min_sentences: usize,
    /// Upper bound on the number of sentences returned
    pub max_sentences: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            ratio: 0.3,
            min_sentences: 3,
            max_sentences: 7,
        }
    }
}

impl SummaryOptions {
    pub fn new(ratio: f64, min_sentences: usize, max_sentences: usize) -> Self {
        Self {
            ratio,
            min_sentences,
            max_sentences,
        }
    }

    /// Same defaults, different ratio.
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    /// Reject a ratio that can't be turned into a sentence count.
    ///
    /// Out-of-range values are fine: the count is clamped into the bounds,
    /// and `max_sentences` wins when the bounds are inverted.
    pub fn validate(&self) -> Result<(), SummaryError> {
        if !self.ratio.is_finite() {
            return Err(SummaryError::InvalidOptions(format!(
                "ratio must be a finite number, got {}",
                self.ratio
            )));
        }
        Ok(())
    }
}

/// Which part of the input feeds the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyStrategy {
    /// Hash only the first N characters
    Prefix(usize),
    /// Hash the whole document
    FullContent,
}

impl Default for CacheKeyStrategy {
    fn default() -> Self {
        Self::Prefix(1000)
    }
}

/// Tunables for a [`SummaryGenerator`](crate::summarizer::generator::SummaryGenerator).
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides:
///
/// ```json
/// { "language": "de", "window": 30, "cache_key": "full_content" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Stopword lexicon language
    pub language: String,
    /// Inputs shorter than this (in chars) are returned unchanged
    pub min_chars: usize,
    /// Sentence normalization is skipped above this length (in chars)
    pub preprocess_max_chars: usize,
    /// Documents with this many sentences or fewer are returned unchanged
    pub few_sentences: usize,
    /// Largest sentence count that gets a full pairwise matrix
    pub dense_limit: usize,
    /// Half-width of the similarity band for larger documents
    pub window: usize,
    /// Sentence count above which downsampling kicks in
    pub downsample_threshold: usize,
    /// Up to this many sentences keep every 2nd, beyond it every 5th
    pub downsample_medium_limit: usize,
    /// Sentence count above which matrix rows are computed in parallel
    pub parallel_threshold: usize,
    /// PageRank iteration cap
    pub max_iterations: usize,
    /// Per-node PageRank tolerance
    pub tolerance: f64,
    /// PageRank damping factor
    pub damping: f64,
    /// Maximum number of cached summaries
    pub cache_capacity: u64,
    /// How the cache key is derived from the input
    pub cache_key: CacheKeyStrategy,
    /// Characters kept by the fast-path failure fallback
    pub fast_fallback_chars: usize,
    /// Above this length `auto_summarize` ranks a truncated prefix
    pub long_document_chars: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            min_chars: 100,
            preprocess_max_chars: 10_000,
            few_sentences: 3,
            dense_limit: 100,
            window: 50,
            downsample_threshold: 200,
            downsample_medium_limit: 500,
            parallel_threshold: 64,
            max_iterations: 50,
            tolerance: 1e-4,
            damping: 0.85,
            cache_capacity: 1024,
            cache_key: CacheKeyStrategy::default(),
            fast_fallback_chars: 500,
            long_document_chars: 8000,
        }
    }
}

impl GeneratorConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How a summary was produced.
#[derive(Debug)]
pub enum SummaryKind {
    /// Full TextRank pipeline ran
    Ranked,
    /// Served from the cache
    Cached,
    /// Input was too short or had too few sentences; returned as-is
    Unchanged,
    /// Pipeline failed; text holds the leading-sentences fallback
    Degraded(SummaryError),
}

/// A summary together with how it was produced.
#[derive(Debug)]
pub struct Summary {
    pub text: String,
    pub kind: SummaryKind,
}

impl Summary {
    pub fn ranked(text: String) -> Self {
        Self {
            text,
            kind: SummaryKind::Ranked,
        }
    }

    pub fn cached(text: String) -> Self {
        Self {
            text,
            kind: SummaryKind::Cached,
        }
    }

    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: SummaryKind::Unchanged,
        }
    }

    pub fn degraded(text: String, error: SummaryError) -> Self {
        Self {
            text,
            kind: SummaryKind::Degraded(error),
        }
    }

    /// True when the summary came from the fallback path.
    pub fn is_degraded(&self) -> bool {
        matches!(self.kind, SummaryKind::Degraded(_))
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
