//! Weighted PageRank by power iteration
//!
//! Each round a sentence passes its damped score to its neighbours in
//! proportion to their similarity. Isolated sentences have nobody to pass
//! to, so their score is spread over every sentence instead. Rounds stop
//! once the summed change falls under `n * tolerance`, or at the round cap;
//! a capped run still yields usable scores since only their order matters.

use super::PageRankResult;
use crate::graph::sentence_graph::SentenceGraph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerIteration {
    pub damping: f64,
    pub max_iterations: usize,
    /// Allowed average change per sentence at convergence
    pub tolerance: f64,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 50,
            tolerance: 1e-4,
        }
    }
}

impl PowerIteration {
    pub fn new(damping: f64, max_iterations: usize, tolerance: f64) -> Self {
        Self {
            damping,
            max_iterations,
            tolerance,
        }
    }

    /// Convergence bound on the L1 change for a graph of `n` sentences.
    pub fn threshold(&self, n: usize) -> f64 {
        n as f64 * self.tolerance
    }

    pub fn rank(&self, graph: &SentenceGraph) -> PageRankResult {
        let n = graph.len();
        if n == 0 {
            return PageRankResult::new(Vec::new(), 0, 0.0, true);
        }

        let threshold = self.threshold(n);
        let isolated: Vec<usize> = graph.isolated().collect();
        let mut current = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations && delta > threshold {
            self.step(graph, &isolated, &current, &mut next);
            delta = current
                .iter()
                .zip(&next)
                .map(|(old, new)| (old - new).abs())
                .sum();
            std::mem::swap(&mut current, &mut next);
            iterations += 1;
        }

        let total: f64 = current.iter().sum();
        if total > 0.0 {
            current.iter_mut().for_each(|s| *s /= total);
        }

        PageRankResult::new(current, iterations, delta, delta <= threshold)
    }

    fn step(
        &self,
        graph: &SentenceGraph,
        isolated: &[usize],
        current: &[f64],
        next: &mut [f64],
    ) {
        let n = current.len() as f64;
        let stranded: f64 = isolated.iter().map(|&i| current[i]).sum();
        next.fill((1.0 - self.damping + self.damping * stranded) / n);

        for (i, &score) in current.iter().enumerate() {
            let strength = graph.strength(i);
            if strength <= 0.0 {
                continue;
            }
            let share = self.damping * score / strength;
            for (j, weight) in graph.edges(i) {
                next[j] += share * weight;
            }
        }
    }
}
