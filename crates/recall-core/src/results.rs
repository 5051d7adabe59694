//! Comparison output record.

use serde::{Deserialize, Serialize};

use crate::align::WordComparison;
use crate::normalize::NormalizedWord;
use crate::token::Token;

/// Everything a caller needs from one comparison.
///
/// A plain value: progression logic reads `accuracy`, a renderer reads the
/// token streams and word lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Combined score, `0..=100`.
    pub accuracy: u8,
    /// Percentage of passage words credited by the aligner.
    pub content_accuracy: f64,
    /// Percentage of raw characters matching by position.
    pub format_accuracy: f64,
    /// Number of normalized words in the passage.
    pub total_words: usize,
    /// Number of passage words credited, never above `total_words`.
    pub correct_words: usize,
    /// Passage words absent from the attempt.
    pub missing_words: Vec<NormalizedWord>,
    /// Attempt words absent from the passage.
    pub incorrect_words: Vec<NormalizedWord>,
    /// Display tokens of the passage.
    pub original_tokens: Vec<Token>,
    /// Display tokens of the attempt.
    pub attempt_tokens: Vec<Token>,
    /// Aligned word pairs.
    pub word_comparisons: Vec<WordComparison>,
}

impl ComparisonResult {
    /// Whether a passage token should be highlighted as missed.
    pub fn is_missing(&self, token: &Token) -> bool {
        token
            .normalized()
            .is_some_and(|w| self.missing_words.contains(w))
    }

    /// Whether an attempt token should be highlighted as wrong.
    pub fn is_incorrect(&self, token: &Token) -> bool {
        token
            .normalized()
            .is_some_and(|w| self.incorrect_words.contains(w))
    }

    /// True when every passage word was reproduced and nothing extra was added.
    pub fn is_word_perfect(&self) -> bool {
        self.correct_words == self.total_words
            && self.missing_words.is_empty()
            && self.incorrect_words.is_empty()
    }
}
