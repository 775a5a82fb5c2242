//! PageRank over the sentence-similarity graph

pub mod power;

/// Centrality scores from one ranking run
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Score per sentence, in graph order; sums to one
    pub scores: Vec<f64>,
    /// Rounds of power iteration performed
    pub iterations: usize,
    /// L1 change in the last round
    pub delta: f64,
    /// False when the round cap was hit first
    pub converged: bool,
}

impl PageRankResult {
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.scores.iter().all(|s| s.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_finite() {
        assert!(PageRankResult::new(vec![0.5, 0.5], 3, 0.0, true).is_finite());
        assert!(!PageRankResult::new(vec![0.5, f64::NAN], 3, 0.0, true).is_finite());
        assert!(PageRankResult::new(Vec::new(), 0, 0.0, true).is_finite());
    }
}
