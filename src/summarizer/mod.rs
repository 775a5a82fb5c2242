//! Summarization components
//!
//! Provides extractive summarization by ranking sentences with PageRank
//! over their similarity graph, plus a positional fast path.

pub mod cache;
pub mod fast;
pub mod generator;
pub mod selector;
