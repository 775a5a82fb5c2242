//! Sentence graph in compressed sparse row form
//!
//! One row per sentence, one entry per positive similarity, taken straight
//! from the [`SimilarityMatrix`]. Matrix rows are already sorted by column,
//! so neighbour order (and with it score accumulation) is deterministic.

use super::similarity::SimilarityMatrix;

/// Undirected, weighted sentence graph.
#[derive(Debug, Clone, Default)]
pub struct SentenceGraph {
    /// Sentence i's edges live at `offsets[i]..offsets[i + 1]`
    offsets: Vec<usize>,
    targets: Vec<u32>,
    weights: Vec<f64>,
    /// Summed edge weight per sentence
    strength: Vec<f64>,
}

impl SentenceGraph {
    pub fn from_similarity(matrix: &SimilarityMatrix) -> Self {
        let n = matrix.len();
        let entries = matrix.nonzero_count();

        let mut offsets = Vec::with_capacity(n + 1);
        let mut targets = Vec::with_capacity(entries);
        let mut weights = Vec::with_capacity(entries);
        let mut strength = Vec::with_capacity(n);
        offsets.push(0);

        for i in 0..n {
            let row = matrix.row(i);
            targets.extend(row.iter().map(|&(j, _)| j));
            weights.extend(row.iter().map(|&(_, sim)| sim));
            strength.push(row.iter().map(|&(_, sim)| sim).sum());
            offsets.push(targets.len());
        }

        Self {
            offsets,
            targets,
            weights,
            strength,
        }
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.strength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strength.is_empty()
    }

    /// Undirected edge count.
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Similar sentences and their weights.
    pub fn edges(&self, sentence: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.offsets[sentence]..self.offsets[sentence + 1];
        self.targets[span.clone()]
            .iter()
            .zip(&self.weights[span])
            .map(|(&j, &w)| (j as usize, w))
    }

    pub fn strength(&self, sentence: usize) -> f64 {
        self.strength[sentence]
    }

    /// Sentences that share no content word with any compared sentence.
    pub fn isolated(&self) -> impl Iterator<Item = usize> + '_ {
        self.strength
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s <= 0.0)
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::similarity::MatrixConfig;
    use rustc_hash::FxHashSet;

    fn graph(sentences: &[&[&str]]) -> SentenceGraph {
        let sets: Vec<FxHashSet<String>> = sentences
            .iter()
            .map(|words| words.iter().map(|w| w.to_string()).collect())
            .collect();
        SentenceGraph::from_similarity(&SimilarityMatrix::from_word_sets(
            &sets,
            &MatrixConfig::default(),
        ))
    }

    #[test]
    fn test_edges_follow_matrix() {
        // 0-1 share "cat" (1/3), 1-2 share "hat" (1/3), 0-2 nothing
        let g = graph(&[&["cat", "mat"], &["cat", "hat"], &["hat", "bat"], &["stock"]]);

        assert_eq!(g.len(), 4);
        assert_eq!(g.edge_count(), 2);

        let neighbours: Vec<_> = g.edges(1).collect();
        assert_eq!(neighbours.len(), 2);
        assert_eq!(neighbours[0].0, 0);
        assert_eq!(neighbours[1].0, 2);
        assert!((g.strength(1) - 2.0 / 3.0).abs() < 1e-12);
        assert!(g.edges(0).all(|(j, _)| j == 1));
    }

    #[test]
    fn test_isolated_sentences() {
        let g = graph(&[&["cat"], &["cat"], &["stock"], &[]]);

        assert_eq!(g.isolated().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(g.edges(3).count(), 0);
        assert_eq!(g.strength(3), 0.0);
    }

    #[test]
    fn test_empty() {
        let g = graph(&[]);

        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.isolated().count(), 0);
    }
}
