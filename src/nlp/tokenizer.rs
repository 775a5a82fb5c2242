//! Sentence and word tokenization
//!
//! Sentences are segmented with Unicode (UAX #29) sentence boundaries. If
//! the segmenter can't handle a text, [`SentenceTokenizer`] drops down to a
//! plain terminal-punctuation split, which is less accurate but never fails.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;
use crate::errors::SummaryError;

/// Whitespace following a sentence terminal. The split point sits right
/// after the (single-byte) punctuation mark.
static TERMINAL_BREAK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").ok());

static WORD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w+").ok());

/// Light normalization: keep word characters, whitespace and periods, then
/// lowercase.
pub fn preprocess(text: &str) -> String {
    text.chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace() || c == '.')
        .collect::<String>()
        .to_lowercase()
}

/// The first `chars` characters of `text` (the whole text if shorter).
pub fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Split after every `.`, `!` or `?` that is followed by whitespace.
///
/// Pieces are trimmed and empty pieces dropped. Text without terminals
/// comes back as a single sentence.
pub fn split_on_terminals(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let Some(re) = TERMINAL_BREAK.as_ref() else {
        push_trimmed(&mut sentences, text);
        return sentences;
    };

    let mut start = 0;
    for m in re.find_iter(text) {
        push_trimmed(&mut sentences, &text[start..m.start() + 1]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// Lowercased words longer than one character that aren't stopwords.
pub fn content_words(sentence: &str, stopwords: &StopwordFilter) -> FxHashSet<String> {
    let Some(re) = WORD.as_ref() else {
        return FxHashSet::default();
    };
    re.find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() > 1 && !stopwords.is_stopword(w))
        .collect()
}

/// A sentence boundary detector.
pub trait SentenceSplitter: Send + Sync {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    /// Split `text` into sentences in document order.
    fn split(&self, text: &str) -> Result<Vec<String>, SummaryError>;
}

/// UAX #29 sentence segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn name(&self) -> &'static str {
        "unicode"
    }

    fn split(&self, text: &str) -> Result<Vec<String>, SummaryError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sentences: Vec<String> = text
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        // Segments only count if they hold a letter or digit, so text made
        // of symbols alone has no boundaries to offer.
        if sentences.is_empty() {
            return Err(SummaryError::SegmenterUnavailable);
        }
        Ok(sentences)
    }
}

/// Terminal-punctuation split, see [`split_on_terminals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSentenceSplitter;

impl SentenceSplitter for RegexSentenceSplitter {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn split(&self, text: &str) -> Result<Vec<String>, SummaryError> {
        Ok(split_on_terminals(text))
    }
}

/// Primary splitter with the regex split as a safety net.
#[derive(Clone)]
pub struct SentenceTokenizer {
    primary: Arc<dyn SentenceSplitter>,
    fallback: RegexSentenceSplitter,
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SentenceTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceTokenizer")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl SentenceTokenizer {
    pub fn new() -> Self {
        Self::with_primary(Arc::new(UnicodeSentenceSplitter))
    }

    pub fn with_primary(primary: Arc<dyn SentenceSplitter>) -> Self {
        Self {
            primary,
            fallback: RegexSentenceSplitter,
        }
    }

    /// Split into sentences, falling back to the regex split if the primary
    /// splitter fails.
    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        match self.primary.split(text) {
            Ok(sentences) => sentences,
            Err(err) => {
                debug!(
                    splitter = self.primary.name(),
                    error = %err,
                    "primary sentence splitter failed, using regex split"
                );
                split_on_terminals(text)
            }
        }
    }
}
