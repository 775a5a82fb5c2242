//! TextRank summary generator
//!
//! [`SummaryGenerator`] runs the full pipeline: cache lookup, sentence
//! segmentation, optional downsampling, similarity matrix, PageRank, top-K
//! selection in document order, cache write.
//!
//! The string-returning methods never fail. Any pipeline error is logged and
//! answered with a degraded summary (the leading sentences). Callers that
//! need to know which path was taken use [`SummaryGenerator::summarize`],
//! which reports it in [`SummaryKind`](crate::types::SummaryKind).

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, info_span, warn};

use super::cache::SummaryCache;
use super::fast::{positional_pick, truncate_with_ellipsis};
use super::selector::{join_sentences, select_top, target_count, DownsamplePolicy};
use crate::errors::SummaryError;
use crate::graph::sentence_graph::SentenceGraph;
use crate::graph::similarity::{self, MatrixConfig, SimilarityMatrix};
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{
    char_prefix, content_words, preprocess, split_on_terminals, SentenceSplitter,
    SentenceTokenizer,
};
use crate::pagerank::power::PowerIteration;
use crate::pagerank::PageRankResult;
use crate::types::{GeneratorConfig, Sentence, Summary, SummaryOptions};

/// Sentences kept by the degraded fallback.
const FALLBACK_SENTENCES: usize = 3;

/// Sentences requested from the fast path by `auto_summarize`.
const AUTO_FAST_SENTENCES: usize = 3;

/// Extractive summarizer.
///
/// Cloning is cheap; clones share the stopword set, sentence splitter and
/// cache.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    config: GeneratorConfig,
    stopwords: Arc<StopwordFilter>,
    tokenizer: SentenceTokenizer,
    cache: SummaryCache,
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryGenerator {
    /// English stopwords, default limits, 1024-entry cache.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Build from a config. Stopwords for `config.language` fall back to the
    /// embedded default set if no lexicon is available.
    pub fn with_config(config: GeneratorConfig) -> Self {
        let stopwords = StopwordFilter::load_or_fallback(&config.language);
        let cache = SummaryCache::new(config.cache_capacity, config.cache_key);
        Self {
            config,
            stopwords: Arc::new(stopwords),
            tokenizer: SentenceTokenizer::new(),
            cache,
        }
    }

    /// Use an externally owned cache, e.g. one shared between generators.
    pub fn with_cache(mut self, cache: SummaryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = Arc::new(stopwords);
        self
    }

    /// Replace the primary sentence splitter. The regex split stays as the
    /// fallback.
    pub fn with_sentence_splitter(mut self, splitter: Arc<dyn SentenceSplitter>) -> Self {
        self.tokenizer = SentenceTokenizer::with_primary(splitter);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    // ------------------------------------------------------------------
    // Ranked summaries
    // ------------------------------------------------------------------

    /// Summarize with the default options, overriding only the bounds
    /// given. Never fails.
    pub fn generate_summary(
        &self,
        text: &str,
        ratio: f64,
        min_sentences: usize,
        max_sentences: usize,
    ) -> String {
        let options = SummaryOptions::new(ratio, min_sentences, max_sentences);
        self.summarize(text, &options).into_text()
    }

    /// Summarize every text with the given ratio. Documents are processed
    /// in parallel; output order matches input order.
    pub fn batch_summarize<S>(&self, texts: &[S], ratio: f64) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let options = SummaryOptions::default().with_ratio(ratio);
        texts
            .par_iter()
            .map(|text| self.summarize(text.as_ref(), &options).into_text())
            .collect()
    }

    /// Summarize, reporting how the result was produced.
    pub fn summarize(&self, text: &str, options: &SummaryOptions) -> Summary {
        let _span = info_span!("summarize", bytes = text.len()).entered();

        match self.try_summarize(text, options) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(
                    error = %err,
                    code = err.code(),
                    "summary generation failed, returning leading sentences"
                );
                Summary::degraded(leading_sentences(text, FALLBACK_SENTENCES), err)
            }
        }
    }

    /// The pipeline without the degraded fallback.
    pub fn try_summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<Summary, SummaryError> {
        options.validate()?;

        let key = self.cache.key(text, options);
        if let Some(summary) = self.cache.get(&key) {
            debug!("summary cache hit");
            return Ok(Summary::cached(summary));
        }

        let char_count = text.chars().count();
        if char_count < self.config.min_chars || text.trim().is_empty() {
            return Ok(Summary::unchanged(text));
        }

        let sentences = Sentence::from_texts(self.tokenizer.tokenize_sentences(text));
        if sentences.len() <= self.config.few_sentences {
            debug!(sentences = sentences.len(), "too few sentences to summarize");
            return Ok(Summary::unchanged(text));
        }

        let total = sentences.len();
        let sentences = self.downsample_policy().apply(sentences);
        if sentences.len() < total {
            debug!(from = total, to = sentences.len(), "downsampled long document");
        }

        let ranking = self.rank_sentences(&sentences, self.normalizes(char_count))?;

        let count = target_count(
            sentences.len(),
            options.ratio,
            options.min_sentences,
            options.max_sentences,
        );
        let selected = select_top(&sentences, &ranking.scores, count);
        let summary = join_sentences(&selected);

        self.cache.insert(key, summary.clone());
        Ok(Summary::ranked(summary))
    }

    /// PageRank centrality for each sentence, in the order given.
    ///
    /// With `normalize`, sentences go through [`preprocess`] before their
    /// content words are collected.
    pub fn rank_sentences(
        &self,
        sentences: &[Sentence],
        normalize: bool,
    ) -> Result<PageRankResult, SummaryError> {
        if sentences.is_empty() {
            return Err(SummaryError::NoSentences);
        }

        let word_sets = self.word_sets(sentences, normalize);
        let matrix = SimilarityMatrix::from_word_sets(&word_sets, &self.matrix_config());
        debug!(
            sentences = matrix.len(),
            mode = ?matrix.mode(),
            comparisons = matrix.comparisons(),
            "built similarity matrix"
        );

        let graph = SentenceGraph::from_similarity(&matrix);
        let result = PowerIteration::new(
            self.config.damping,
            self.config.max_iterations,
            self.config.tolerance,
        )
        .rank(&graph);

        if !result.converged {
            debug!(
                iterations = result.iterations,
                delta = result.delta,
                "pagerank stopped at iteration cap"
            );
        }
        if !result.is_finite() {
            return Err(SummaryError::NonFiniteScores);
        }
        Ok(result)
    }

    /// Documents up to `preprocess_max_chars` (inclusive) are normalized.
    fn normalizes(&self, char_count: usize) -> bool {
        char_count <= self.config.preprocess_max_chars
    }

    fn word_sets(&self, sentences: &[Sentence], normalize: bool) -> Vec<FxHashSet<String>> {
        let words = |sentence: &Sentence| {
            if normalize {
                content_words(&preprocess(&sentence.text), &self.stopwords)
            } else {
                content_words(&sentence.text, &self.stopwords)
            }
        };

        if sentences.len() > self.config.parallel_threshold {
            sentences.par_iter().map(words).collect()
        } else {
            sentences.iter().map(words).collect()
        }
    }

    fn matrix_config(&self) -> MatrixConfig {
        MatrixConfig {
            dense_limit: self.config.dense_limit,
            window: self.config.window,
            parallel_threshold: self.config.parallel_threshold,
        }
    }

    fn downsample_policy(&self) -> DownsamplePolicy {
        DownsamplePolicy {
            threshold: self.config.downsample_threshold,
            medium_limit: self.config.downsample_medium_limit,
        }
    }

    // ------------------------------------------------------------------
    // Building blocks
    // ------------------------------------------------------------------

    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize_sentences(text)
    }

    pub fn sentence_similarity(&self, a: &str, b: &str) -> f64 {
        similarity::sentence_similarity(a, b, &self.stopwords)
    }

    pub fn build_similarity_matrix<S: AsRef<str>>(&self, sentences: &[S]) -> SimilarityMatrix {
        similarity::build_similarity_matrix(sentences, &self.stopwords, &self.matrix_config())
    }

    // ------------------------------------------------------------------
    // Fast path
    // ------------------------------------------------------------------

    /// Positional summary without ranking. Never fails; on error the first
    /// characters of the text are returned with an ellipsis.
    pub fn fast_summarize(&self, text: &str, num_sentences: usize) -> String {
        match self.try_fast_summarize(text, num_sentences) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(error = %err, code = err.code(), "fast summary failed, truncating");
                truncate_with_ellipsis(text, self.config.fast_fallback_chars)
            }
        }
    }

    pub fn try_fast_summarize(
        &self,
        text: &str,
        num_sentences: usize,
    ) -> Result<String, SummaryError> {
        if text.chars().count() < self.config.min_chars || text.trim().is_empty() {
            return Ok(text.to_string());
        }
        if num_sentences == 0 {
            return Err(SummaryError::InvalidOptions(
                "num_sentences must be at least 1".to_string(),
            ));
        }

        let sentences = self.tokenizer.tokenize_sentences(text);
        if sentences.is_empty() {
            return Err(SummaryError::NoSentences);
        }

        match positional_pick(&sentences, num_sentences) {
            Some(picked) => Ok(picked.join(" ")),
            None => Ok(text.to_string()),
        }
    }

    /// Rank a truncated prefix of long documents, take the fast path for
    /// everything else.
    pub fn auto_summarize(&self, text: &str) -> String {
        let limit = self.config.long_document_chars;
        if text.chars().count() > limit {
            let defaults = SummaryOptions::default();
            self.summarize(char_prefix(text, limit), &defaults)
                .into_text()
        } else {
            self.fast_summarize(text, AUTO_FAST_SENTENCES)
        }
    }
}

/// The first `count` sentences of a terminal-punctuation split.
fn leading_sentences(text: &str, count: usize) -> String {
    let sentences = split_on_terminals(text);
    let end = count.min(sentences.len());
    sentences[..end].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SummaryKind;

    const PARAGRAPH: &str = "Rust is a systems programming language. \
        It guarantees memory safety without a garbage collector. \
        The borrow checker enforces ownership rules at compile time. \
        Many companies now use Rust for infrastructure. \
        Rust memory safety rules prevent data races in concurrent programs. \
        The language has a growing ecosystem of libraries.";

    struct BrokenSplitter;

    impl SentenceSplitter for BrokenSplitter {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn split(&self, _text: &str) -> Result<Vec<String>, SummaryError> {
            Err(SummaryError::SegmenterUnavailable)
        }
    }

    #[test]
    fn test_short_input_unchanged() {
        let generator = SummaryGenerator::new();
        let summary = generator.summarize("Short text.", &SummaryOptions::default());

        assert_eq!(summary.text, "Short text.");
        assert!(matches!(summary.kind, SummaryKind::Unchanged));
        assert_eq!(generator.generate_summary("", 0.3, 3, 7), "");
    }

    #[test]
    fn test_ranked_summary_sentence_count() {
        let generator = SummaryGenerator::new();
        let summary = generator.summarize(PARAGRAPH, &SummaryOptions::default());

        assert!(matches!(summary.kind, SummaryKind::Ranked));
        let sentences = generator.tokenize_sentences(&summary.text);
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_cache_hit_skips_pipeline() {
        let generator = SummaryGenerator::new();
        let options = SummaryOptions::default();

        let first = generator.summarize(PARAGRAPH, &options);
        let second = generator.summarize(PARAGRAPH, &options);

        assert_eq!(first.text, second.text);
        assert!(matches!(second.kind, SummaryKind::Cached));
        assert_eq!(generator.cache().stats().hits, 1);
    }

    #[test]
    fn test_invalid_options_degrade() {
        let generator = SummaryGenerator::new();
        let summary = generator.summarize(PARAGRAPH, &SummaryOptions::new(f64::NAN, 3, 7));

        assert!(summary.is_degraded());
        assert_eq!(
            summary.text,
            "Rust is a systems programming language. \
             It guarantees memory safety without a garbage collector. \
             The borrow checker enforces ownership rules at compile time."
        );
    }

    #[test]
    fn test_try_summarize_surfaces_error() {
        let generator = SummaryGenerator::new();
        let err = generator
            .try_summarize(PARAGRAPH, &SummaryOptions::new(f64::NAN, 3, 7))
            .unwrap_err();
        assert!(matches!(err, SummaryError::InvalidOptions(_)));
    }

    #[test]
    fn test_regex_fallback_splitter_still_ranks() {
        let generator = SummaryGenerator::new().with_sentence_splitter(Arc::new(BrokenSplitter));
        let summary = generator.summarize(PARAGRAPH, &SummaryOptions::default());

        assert!(matches!(summary.kind, SummaryKind::Ranked));
        assert_eq!(generator.tokenize_sentences(&summary.text).len(), 3);
    }

    #[test]
    fn test_rank_sentences_empty_is_error() {
        let generator = SummaryGenerator::new();
        assert!(matches!(
            generator.rank_sentences(&[], true),
            Err(SummaryError::NoSentences)
        ));
    }

    #[test]
    fn test_fast_summarize_zero_sentences_truncates() {
        let generator = SummaryGenerator::new();
        let summary = generator.fast_summarize(PARAGRAPH, 0);

        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), PARAGRAPH.chars().count().min(500) + 3);
    }

    #[test]
    fn test_auto_summarize_short_uses_fast_path() {
        let generator = SummaryGenerator::new();
        assert_eq!(
            generator.auto_summarize(PARAGRAPH),
            generator.fast_summarize(PARAGRAPH, 3)
        );
    }

    const HYPHENATED: &str = "Gamma spectroscopy puzzles astronomers. \
        Alpha-beta-gamma-delta notation confuses freshmen. \
        Alpha particles ionize argon. \
        Beta testers catalogue glitches. \
        Delta estuaries flood marshland.";

    fn with_preprocess_limit(limit: usize) -> SummaryGenerator {
        SummaryGenerator::with_config(GeneratorConfig {
            preprocess_max_chars: limit,
            ..GeneratorConfig::default()
        })
        .with_stopwords(StopwordFilter::fallback())
    }

    #[test]
    fn test_default_preprocess_limit() {
        let generator = SummaryGenerator::new();
        assert!(generator.normalizes(10_000));
        assert!(!generator.normalizes(10_001));
    }

    #[test]
    fn test_word_sets_with_and_without_normalization() {
        let generator = SummaryGenerator::new().with_stopwords(StopwordFilter::fallback());
        let sentences = [Sentence::new("Solar-panel output, don't stop.", 0)];

        let raw = &generator.word_sets(&sentences, false)[0];
        assert!(raw.contains("solar") && raw.contains("panel") && raw.contains("don"));
        assert!(!raw.contains("t"));

        let normalized = &generator.word_sets(&sentences, true)[0];
        assert!(normalized.contains("solarpanel") && normalized.contains("dont"));
        assert!(!normalized.contains("solar"));
        assert!(normalized.contains("output") && normalized.contains("stop"));
    }

    #[test]
    fn test_preprocess_limit_changes_ranking() {
        let chars = HYPHENATED.chars().count();
        let options = SummaryOptions::new(0.0, 1, 1);

        // Normalized, the compound becomes one word and no sentence overlaps
        // another, so the first sentence wins the tie.
        let at_limit = with_preprocess_limit(chars).summarize(HYPHENATED, &options);
        assert!(matches!(at_limit.kind, SummaryKind::Ranked));
        assert_eq!(at_limit.text, "Gamma spectroscopy puzzles astronomers.");

        // Raw, the compound shares a word with every other sentence.
        let over_limit = with_preprocess_limit(chars - 1).summarize(HYPHENATED, &options);
        assert!(matches!(over_limit.kind, SummaryKind::Ranked));
        assert_eq!(
            over_limit.text,
            "Alpha-beta-gamma-delta notation confuses freshmen."
        );
    }

    #[test]
    fn test_leading_sentences() {
        assert_eq!(leading_sentences("A b. C d! E f? G h.", 3), "A b. C d! E f?");
        assert_eq!(leading_sentences("Only one", 3), "Only one");
        assert_eq!(leading_sentences("", 3), "");
    }
}
