//! Natural Language Processing components
//!
//! This module provides sentence tokenization, word extraction and
//! stopword filtering.

pub mod stopwords;
pub mod tokenizer;
