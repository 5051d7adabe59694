//! Format fidelity: punctuation, capitalization and spacing.
//!
//! Raw strings are compared character by character at equal indices, so a
//! single dropped character early in the attempt shifts every later
//! comparison. Characters are Unicode scalar values, not bytes.

use serde::{Deserialize, Serialize};

/// Percentage of positions where the raw characters agree.
///
/// The denominator is the longer of the two strings. Two empty strings score
/// 100; one empty and one non-empty score 0.
pub fn format_accuracy(original: &str, attempt: &str) -> f64 {
    let original_len = original.chars().count();
    let attempt_len = attempt.chars().count();
    let max_len = original_len.max(attempt_len);
    if max_len == 0 {
        return 100.0;
    }

    let matches = original
        .chars()
        .zip(attempt.chars())
        .filter(|(o, a)| o == a)
        .count();

    matches as f64 / max_len as f64 * 100.0
}

/// How one character position compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharMark {
    Match,
    /// Same letter, different case.
    Capitalization,
    Substitution,
    /// The attempt ended before this position.
    Missing,
    /// The attempt continues past the end of the passage.
    Extra,
}

/// One position of the character-level diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharDiff {
    pub index: usize,
    pub expected: Option<char>,
    pub actual: Option<char>,
    pub mark: CharMark,
}

/// Positional character diff over `[0, max(len))`, for highlighting.
pub fn char_diff(original: &str, attempt: &str) -> Vec<CharDiff> {
    let expected: Vec<char> = original.chars().collect();
    let actual: Vec<char> = attempt.chars().collect();
    let len = expected.len().max(actual.len());

    (0..len)
        .map(|index| {
            let e = expected.get(index).copied();
            let a = actual.get(index).copied();
            let mark = match (e, a) {
                (Some(e), Some(a)) if e == a => CharMark::Match,
                (Some(e), Some(a)) if e.to_lowercase().eq(a.to_lowercase()) => {
                    CharMark::Capitalization
                }
                (Some(_), Some(_)) => CharMark::Substitution,
                (Some(_), None) => CharMark::Missing,
                (None, _) => CharMark::Extra,
            };
            CharDiff {
                index,
                expected: e,
                actual: a,
                mark,
            }
        })
        .collect()
}
