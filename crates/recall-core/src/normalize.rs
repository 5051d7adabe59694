//! Word-level canonicalization.
//!
//! Lowercases, strips everything that is not a letter, digit, whitespace or
//! an in-word apostrophe, then collapses whitespace. Hyphens are deleted
//! outright, so "self-evident" becomes the single word "selfevident".
//!
//! Typographic apostrophes (`’`) are not folded into `'` and get stripped
//! like any other punctuation, so "don’t" normalizes to "dont" while
//! "don't" keeps its apostrophe. Anything `char::is_alphanumeric` accepts
//! (superscripts, vulgar fractions, non-Latin scripts) passes through.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A case-folded, punctuation-stripped word used only for equivalence tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedWord(String);

impl NormalizedWord {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedWord {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedWord {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonicalize `text` for word-level comparison. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered: Vec<char> = text.to_lowercase().chars().collect();
    let mut kept = String::with_capacity(lowered.len());

    for (i, &c) in lowered.iter().enumerate() {
        if c.is_alphanumeric() || c.is_whitespace() {
            kept.push(c);
        } else if c == '\'' && is_in_word_apostrophe(&lowered, i) {
            kept.push(c);
        }
    }

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// An apostrophe survives only with a letter on both sides ("don't", "o'er").
fn is_in_word_apostrophe(chars: &[char], i: usize) -> bool {
    let before = i.checked_sub(1).and_then(|j| chars.get(j));
    let after = chars.get(i + 1);
    matches!((before, after), (Some(b), Some(a)) if b.is_alphabetic() && a.is_alphabetic())
}

/// Normalize `text` and split it into scoring words.
pub fn scoring_words(text: &str) -> Vec<NormalizedWord> {
    normalize(text)
        .split_whitespace()
        .map(|w| NormalizedWord(w.to_string()))
        .collect()
}

/// Normalize a single display token; `None` if nothing word-like remains.
pub fn normalize_word(token: &str) -> Option<NormalizedWord> {
    let normalized = normalize(token);
    if normalized.is_empty() || normalized.contains(' ') {
        None
    } else {
        Some(NormalizedWord(normalized))
    }
}
