//! Text analysis module.
//!
//! Turns raw resume text into the term stream the TF-IDF vectorizer counts:
//! a regex tokenizer followed by a chain of token filters (lowercase, stop
//! words, shingles).

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, EnglishAnalyzer, PipelineAnalyzer};
pub use token::{Token, TokenStream};
