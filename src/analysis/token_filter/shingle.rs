//! Shingle (word n-gram) filter implementation.
//!
//! Builds n-grams from consecutive surviving tokens, so a filter chain of
//! `lowercase -> stop -> shingle(1, 2)` yields unigrams plus the bigrams of
//! the stop-word-free sequence.
//!
//! # Examples
//!
//! ```
//! use fakeresume::analysis::token_filter::Filter;
//! use fakeresume::analysis::token_filter::shingle::ShingleFilter;
//! use fakeresume::analysis::token::Token;
//!
//! let filter = ShingleFilter::new(1, 2).unwrap();
//! let tokens = vec![Token::new("machine", 0), Token::new("learning", 1)];
//! let texts: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(texts, vec!["machine", "machine learning", "learning"]);
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{FakeResumeError, Result};

/// Separator placed between the words of a shingle.
pub const SHINGLE_SEPARATOR: &str = " ";

/// A filter that emits word n-grams of every size in `min_size..=max_size`.
///
/// Shingles are built over the tokens as they arrive. Gaps in `position`
/// left by an earlier stop filter do not break adjacency.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    min_size: usize,
    max_size: usize,
}

impl ShingleFilter {
    /// Create a shingle filter for the inclusive size range `min_size..=max_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 || min_size > max_size {
            return Err(FakeResumeError::analysis(format!(
                "Invalid shingle range ({min_size}, {max_size})"
            )));
        }
        Ok(ShingleFilter { min_size, max_size })
    }

    /// Smallest shingle size emitted.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Largest shingle size emitted.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();
        let mut shingles = Vec::with_capacity(words.len() * (self.max_size - self.min_size + 1));

        for start in 0..words.len() {
            for size in self.min_size..=self.max_size {
                let end = start + size;
                if end > words.len() {
                    break;
                }
                let window = &words[start..end];
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(SHINGLE_SEPARATOR);
                let first = &window[0];
                let last = &window[size - 1];
                shingles.push(
                    Token::with_offsets(text, first.position, first.start_offset, last.end_offset)
                        .with_position_length(size),
                );
            }
        }

        Ok(Box::new(shingles.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(filter: &ShingleFilter, words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_unigrams_and_bigrams() {
        let filter = ShingleFilter::new(1, 2).unwrap();
        assert_eq!(
            texts(&filter, &["time", "travel", "corp"]),
            vec!["time", "time travel", "travel", "travel corp", "corp"]
        );
    }

    #[test]
    fn test_bigrams_only() {
        let filter = ShingleFilter::new(2, 2).unwrap();
        assert_eq!(texts(&filter, &["a1", "b2", "c3"]), vec!["a1 b2", "b2 c3"]);
        assert!(texts(&filter, &["alone"]).is_empty());
    }

    #[test]
    fn test_position_gaps_do_not_break_adjacency() {
        let filter = ShingleFilter::new(1, 2).unwrap();
        let tokens = vec![Token::new("expert", 0), Token::new("everything", 2)];
        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["expert", "expert everything", "everything"]);
        assert_eq!(result[1].position_length, 2);
    }

    #[test]
    fn test_invalid_range() {
        assert!(ShingleFilter::new(0, 2).is_err());
        assert!(ShingleFilter::new(3, 2).is_err());
    }
}
