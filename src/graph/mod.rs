//! Graph construction and representation
//!
//! Sentence-similarity scoring and the compressed adjacency that ranking
//! iterates over.

pub mod similarity;
pub mod sentence_graph;
