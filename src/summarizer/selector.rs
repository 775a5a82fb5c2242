//! Sentence selection for ranked summaries
//!
//! Decides how many sentences to keep, thins out very long documents before
//! ranking, and picks the top-scoring sentences back in document order.

use crate::types::Sentence;

/// Number of sentences to keep: `round(n * ratio)` clamped to `[min, max]`.
///
/// `max` wins if the bounds are inverted.
pub fn target_count(n: usize, ratio: f64, min_sentences: usize, max_sentences: usize) -> usize {
    let by_ratio = (n as f64 * ratio).round();
    let by_ratio = if by_ratio.is_finite() && by_ratio > 0.0 {
        by_ratio as usize
    } else {
        0
    };
    by_ratio.max(min_sentences).min(max_sentences)
}

/// Stride-based thinning of long documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownsamplePolicy {
    /// Documents with more sentences than this are thinned
    pub threshold: usize,
    /// Up to this many sentences keep every 2nd, beyond it every 5th
    pub medium_limit: usize,
}

impl Default for DownsamplePolicy {
    fn default() -> Self {
        Self {
            threshold: 200,
            medium_limit: 500,
        }
    }
}

impl DownsamplePolicy {
    /// Keep one sentence in every `stride(n)`.
    pub fn stride(&self, n: usize) -> usize {
        if n <= self.threshold {
            1
        } else if n <= self.medium_limit {
            2
        } else {
            5
        }
    }

    /// Keep sentences 0, stride, 2*stride, ... Each keeps its original index.
    pub fn apply(&self, sentences: Vec<Sentence>) -> Vec<Sentence> {
        let stride = self.stride(sentences.len());
        if stride == 1 {
            return sentences;
        }
        sentences.into_iter().step_by(stride).collect()
    }
}

/// The `k` highest-scoring sentences, returned in document order.
///
/// `scores[i]` belongs to `sentences[i]`. Equal scores favour the earlier
/// sentence.
pub fn select_top(sentences: &[Sentence], scores: &[f64], k: usize) -> Vec<Sentence> {
    let mut ranked: Vec<Sentence> = sentences
        .iter()
        .zip(scores)
        .map(|(sentence, &score)| Sentence {
            score,
            ..sentence.clone()
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    ranked.truncate(k);

    // Back to reading order
    ranked.sort_by_key(|s| s.index);
    ranked
}

/// Join sentences with single spaces.
pub fn join_sentences(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<Sentence> {
        (0..n)
            .map(|i| Sentence::new(format!("Sentence {i}."), i))
            .collect()
    }

    #[test]
    fn test_target_count_clamps() {
        assert_eq!(target_count(10, 0.3, 3, 7), 3);
        assert_eq!(target_count(4, 0.3, 3, 7), 3);
        assert_eq!(target_count(20, 0.3, 3, 7), 6);
        assert_eq!(target_count(100, 0.3, 3, 7), 7);
        assert_eq!(target_count(17, 0.3, 3, 7), 5);
    }

    #[test]
    fn test_target_count_inverted_bounds() {
        assert_eq!(target_count(10, 0.3, 9, 4), 4);
    }

    #[test]
    fn test_downsample_strides() {
        let policy = DownsamplePolicy::default();

        assert_eq!(policy.stride(200), 1);
        assert_eq!(policy.stride(201), 2);
        assert_eq!(policy.stride(500), 2);
        assert_eq!(policy.stride(501), 5);
    }

    #[test]
    fn test_downsample_keeps_original_indices() {
        let policy = DownsamplePolicy::default();

        let medium = policy.apply(numbered(300));
        assert_eq!(medium.len(), 150);
        assert_eq!(medium[1].index, 2);
        assert_eq!(medium[149].index, 298);

        let long = policy.apply(numbered(1000));
        assert_eq!(long.len(), 200);
        assert_eq!(long[3].index, 15);

        assert_eq!(policy.apply(numbered(50)).len(), 50);
    }

    #[test]
    fn test_select_top_document_order() {
        let sentences = numbered(5);
        let scores = [0.1, 0.4, 0.05, 0.3, 0.15];

        let selected = select_top(&sentences, &scores, 3);
        let indices: Vec<_> = selected.iter().map(|s| s.index).collect();

        assert_eq!(indices, vec![1, 3, 4]);
        assert!((selected[0].score - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_select_top_ties_prefer_earlier() {
        let sentences = numbered(4);
        let scores = [0.25; 4];

        let selected = select_top(&sentences, &scores, 2);
        let indices: Vec<_> = selected.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_select_more_than_available() {
        let selected = select_top(&numbered(2), &[0.5, 0.5], 7);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_join_sentences() {
        let sentences = numbered(3);
        assert_eq!(
            join_sentences(&sentences),
            "Sentence 0. Sentence 1. Sentence 2."
        );
        assert_eq!(join_sentences(&[]), "");
    }
}
