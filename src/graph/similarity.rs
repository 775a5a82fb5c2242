//! Sentence similarity
//!
//! Sentences are compared as sets of content words using the Jaccard
//! coefficient. Small documents get every pair scored; larger ones only score
//! pairs within a fixed distance of each other.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::content_words;

/// |A ∩ B| / |A ∪ B|, or 0 if either set is empty.
pub fn jaccard(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|w| large.contains(*w)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Jaccard similarity of two sentences' content words.
pub fn sentence_similarity(a: &str, b: &str, stopwords: &StopwordFilter) -> f64 {
    jaccard(&content_words(a, stopwords), &content_words(b, stopwords))
}

/// Limits for matrix construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixConfig {
    /// Largest sentence count that gets every pair scored
    pub dense_limit: usize,
    /// Half-width of the band used above `dense_limit`
    pub window: usize,
    /// Row computation goes parallel above this sentence count
    pub parallel_threshold: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            dense_limit: 100,
            window: 50,
            parallel_threshold: 64,
        }
    }
}

/// Whether every pair was scored or only a band around the diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixMode {
    Dense,
    Banded { window: usize },
}

/// Symmetric, zero-diagonal similarity matrix.
///
/// Only positive entries are stored: `rows[i]` lists `(j, sim)` sorted by
/// `j`, and every entry appears in both `rows[i]` and `rows[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<(u32, f64)>>,
    mode: MatrixMode,
    /// Number of pair comparisons performed
    comparisons: usize,
}

impl SimilarityMatrix {
    /// Score sentence word sets. Only `i < j` pairs are computed; each value
    /// is mirrored into the lower triangle.
    pub fn from_word_sets(word_sets: &[FxHashSet<String>], config: &MatrixConfig) -> Self {
        let n = word_sets.len();
        let mode = if n <= config.dense_limit {
            MatrixMode::Dense
        } else {
            MatrixMode::Banded {
                window: config.window,
            }
        };
        let reach = match mode {
            MatrixMode::Dense => n,
            MatrixMode::Banded { window } => window,
        };

        let upper_row = |i: usize| -> (usize, Vec<(u32, f64)>) {
            let end = i.saturating_add(reach).saturating_add(1).min(n);
            let start = (i + 1).min(end);
            let scored = (start..end)
                .map(|j| (j as u32, jaccard(&word_sets[i], &word_sets[j])))
                .collect::<Vec<_>>();
            let count = scored.len();
            (count, scored.into_iter().filter(|(_, s)| *s > 0.0).collect())
        };

        let upper: Vec<(usize, Vec<(u32, f64)>)> = if n > config.parallel_threshold {
            (0..n).into_par_iter().map(upper_row).collect()
        } else {
            (0..n).map(upper_row).collect()
        };

        let comparisons = upper.iter().map(|(count, _)| count).sum();
        let mut rows: Vec<Vec<(u32, f64)>> = vec![Vec::new(); n];
        for (i, (_, entries)) in upper.iter().enumerate() {
            for &(j, sim) in entries {
                // Rows fill in ascending column order: lower-triangle
                // entries (from smaller i) land before upper ones.
                rows[j as usize].push((i as u32, sim));
            }
        }
        for (i, (_, entries)) in upper.into_iter().enumerate() {
            rows[i].extend(entries);
        }

        Self {
            rows,
            mode,
            comparisons,
        }
    }

    /// Number of sentences (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    /// Number of pairwise similarities computed to build the matrix.
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Entry `(i, j)`; zero for the diagonal, unscored and dissimilar pairs.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let Some(row) = self.rows.get(i) else {
            return 0.0;
        };
        match row.binary_search_by_key(&(j as u32), |&(col, _)| col) {
            Ok(pos) => row[pos].1,
            Err(_) => 0.0,
        }
    }

    /// Positive entries of row `i`, sorted by column.
    pub fn row(&self, i: usize) -> &[(u32, f64)] {
        self.rows.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of positive off-diagonal entries (each pair counted twice).
    pub fn nonzero_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_symmetric(&self) -> bool {
        self.rows.iter().enumerate().all(|(i, row)| {
            row.iter()
                .all(|&(j, sim)| j as usize != i && self.get(j as usize, i) == sim)
        })
    }
}

/// Build the similarity matrix for raw sentences.
pub fn build_similarity_matrix<S: AsRef<str>>(
    sentences: &[S],
    stopwords: &StopwordFilter,
    config: &MatrixConfig,
) -> SimilarityMatrix {
    let word_sets: Vec<_> = sentences
        .iter()
        .map(|s| content_words(s.as_ref(), stopwords))
        .collect();
    SimilarityMatrix::from_word_sets(&word_sets, config)
}
