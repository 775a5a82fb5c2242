//! Error types
//!
//! Every failure inside the summarization pipeline is expressed as a
//! [`SummaryError`]. The string-returning entry points on
//! [`SummaryGenerator`](crate::summarizer::generator::SummaryGenerator)
//! never surface these; they turn up inside
//! [`SummaryKind::Degraded`](crate::types::SummaryKind::Degraded) or from the
//! `try_*` methods.

use thiserror::Error;

/// Errors raised while building a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Caller-supplied options are out of range.
    #[error("invalid summary options: {0}")]
    InvalidOptions(String),

    /// No stopword lexicon exists for the requested language.
    #[error("no stopword lexicon for language `{language}`")]
    StopwordsUnavailable { language: String },

    /// The primary sentence segmenter could not segment the text.
    #[error("sentence segmenter unavailable")]
    SegmenterUnavailable,

    /// Tokenization produced nothing to rank.
    #[error("text contains no sentences")]
    NoSentences,

    /// Ranking produced NaN or infinite scores.
    #[error("centrality scores are not finite")]
    NonFiniteScores,

    /// A JSON generator config could not be parsed.
    #[error("invalid generator config: {0}")]
    Config(#[from] serde_json::Error),
}

impl SummaryError {
    /// Stable short identifier, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidOptions(_) => "invalid_options",
            Self::StopwordsUnavailable { .. } => "stopwords_unavailable",
            Self::SegmenterUnavailable => "segmenter_unavailable",
            Self::NoSentences => "no_sentences",
            Self::NonFiniteScores => "non_finite_scores",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = SummaryError::StopwordsUnavailable {
            language: "xx".to_string(),
        };
        assert_eq!(err.to_string(), "no stopword lexicon for language `xx`");
        assert_eq!(err.code(), "stopwords_unavailable");
    }

    #[test]
    fn test_config_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SummaryError = parse_err.into();
        assert_eq!(err.code(), "config");
    }
}
