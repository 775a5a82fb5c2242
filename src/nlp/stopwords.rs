//! Stopword filtering
//!
//! Full lexicons come from the `stop-words` crate. When no lexicon exists for
//! the requested language the generator falls back to a small embedded list,
//! so similarity scoring always has some filter to work with.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};
use tracing::warn;

use crate::errors::SummaryError;

/// Embedded default used when the full lexicon can't be loaded.
const FALLBACK_STOPWORDS: &[&str] = &["the", "and", "a", "to", "of", "in", "is", "it", "that"];

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::load_or_fallback("en")
    }
}

impl StopwordFilter {
    /// Load the full lexicon for a language code or English language name.
    ///
    /// Supported: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi, hu, tr, pl, ar
    pub fn try_new(language: &str) -> Result<Self, SummaryError> {
        let lang = Self::resolve_language(language).ok_or_else(|| {
            SummaryError::StopwordsUnavailable {
                language: language.to_string(),
            }
        })?;

        let stopwords: FxHashSet<String> = get(lang).iter().map(|s| s.to_lowercase()).collect();
        if stopwords.is_empty() {
            return Err(SummaryError::StopwordsUnavailable {
                language: language.to_string(),
            });
        }
        Ok(Self { stopwords })
    }

    /// Load the full lexicon, or the embedded default set if that fails.
    pub fn load_or_fallback(language: &str) -> Self {
        match Self::try_new(language) {
            Ok(filter) => filter,
            Err(err) => {
                warn!(error = %err, "using embedded fallback stopwords");
                Self::fallback()
            }
        }
    }

    /// The small embedded default set.
    pub fn fallback() -> Self {
        Self::from_list(FALLBACK_STOPWORDS)
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list(words: &[&str]) -> Self {
        let stopwords: FxHashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.remove(&word.to_lowercase());
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.stopwords.contains(word) {
            return true;
        }
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn resolve_language(language: &str) -> Option<LANGUAGE> {
        let lang = match language.trim().to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "sv" | "swedish" => LANGUAGE::Swedish,
            "no" | "norwegian" => LANGUAGE::Norwegian,
            "da" | "danish" => LANGUAGE::Danish,
            "fi" | "finnish" => LANGUAGE::Finnish,
            "hu" | "hungarian" => LANGUAGE::Hungarian,
            "tr" | "turkish" => LANGUAGE::Turkish,
            "pl" | "polish" => LANGUAGE::Polish,
            "ar" | "arabic" => LANGUAGE::Arabic,
            _ => return None,
        };
        Some(lang)
    }
}
