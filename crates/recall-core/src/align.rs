//! Word alignment strategies.
//!
//! An [`Aligner`] pairs the normalized words of a passage with those of an
//! attempt. A [`WordMatcher`] decides whether a pair counts as correct.
//!
//! [`PositionalAligner`] is the default: word `i` of the passage is compared
//! with word `i` of the attempt and nothing else. A single dropped word early
//! in the attempt shifts every later pair and can take content accuracy to
//! zero. [`SequenceAligner`] tolerates insertions and deletions by anchoring
//! on the longest common subsequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::NormalizedWord;

/// The outcome for one aligned position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordComparison {
    /// Index of this pair in the alignment.
    pub position: usize,
    /// Passage word, or `None` where the attempt has an extra word.
    pub original: Option<NormalizedWord>,
    /// Attempt word, or `None` where the attempt ran out or skipped a word.
    pub attempt: Option<NormalizedWord>,
    /// Whether the pair counts toward `correct_words`.
    pub is_correct: bool,
}

/// Decides whether two normalized words are equivalent.
pub trait WordMatcher: Send + Sync {
    fn matches(&self, original: &NormalizedWord, attempt: &NormalizedWord) -> bool;
}

/// Exact string equality on normalized words.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl WordMatcher for ExactMatcher {
    fn matches(&self, original: &NormalizedWord, attempt: &NormalizedWord) -> bool {
        original == attempt
    }
}

/// Pairs passage words with attempt words.
pub trait Aligner: Send + Sync {
    /// Strategy name, used in logs and reports.
    fn name(&self) -> &str;

    /// Produce the aligned comparisons. Every passage word appears exactly
    /// once as an `original`, in order.
    fn align(
        &self,
        original: &[NormalizedWord],
        attempt: &[NormalizedWord],
        matcher: &dyn WordMatcher,
    ) -> Vec<WordComparison>;
}

/// Selectable alignment strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    #[default]
    Positional,
    Sequence,
}

impl AlignmentStrategy {
    pub fn aligner(self) -> Box<dyn Aligner> {
        match self {
            AlignmentStrategy::Positional => Box::new(PositionalAligner),
            AlignmentStrategy::Sequence => Box::new(SequenceAligner),
        }
    }
}

impl fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentStrategy::Positional => write!(f, "positional"),
            AlignmentStrategy::Sequence => write!(f, "sequence"),
        }
    }
}

impl FromStr for AlignmentStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positional" | "strict" => Ok(AlignmentStrategy::Positional),
            "sequence" | "diff" | "lcs" => Ok(AlignmentStrategy::Sequence),
            other => Err(ConfigError::UnknownAlignment(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Positional
// ---------------------------------------------------------------------------

/// Strict index-by-index pairing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalAligner;

impl Aligner for PositionalAligner {
    fn name(&self) -> &str {
        "positional"
    }

    fn align(
        &self,
        original: &[NormalizedWord],
        attempt: &[NormalizedWord],
        matcher: &dyn WordMatcher,
    ) -> Vec<WordComparison> {
        let len = original.len().max(attempt.len());
        (0..len)
            .map(|i| {
                let o = original.get(i);
                let a = attempt.get(i);
                let is_correct = match (o, a) {
                    (Some(o), Some(a)) => matcher.matches(o, a),
                    _ => false,
                };
                WordComparison {
                    position: i,
                    original: o.cloned(),
                    attempt: a.cloned(),
                    is_correct,
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sequence (LCS diff)
// ---------------------------------------------------------------------------

/// Longest-common-subsequence alignment.
///
/// Matched words anchor the alignment. Between two anchors the leftover
/// passage and attempt words are paired up as substitutions; whatever is
/// left over becomes a deletion (`attempt: None`) or an insertion
/// (`original: None`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAligner;

impl Aligner for SequenceAligner {
    fn name(&self) -> &str {
        "sequence"
    }

    fn align(
        &self,
        original: &[NormalizedWord],
        attempt: &[NormalizedWord],
        matcher: &dyn WordMatcher,
    ) -> Vec<WordComparison> {
        let anchors = lcs_anchors(original, attempt, matcher);

        let mut out = Vec::with_capacity(original.len().max(attempt.len()));
        let (mut oi, mut ai) = (0usize, 0usize);

        for (om, am) in anchors
            .into_iter()
            .chain(std::iter::once((original.len(), attempt.len())))
        {
            push_gap(&mut out, &original[oi..om], &attempt[ai..am]);
            if om < original.len() && am < attempt.len() {
                out.push(WordComparison {
                    position: out.len(),
                    original: Some(original[om].clone()),
                    attempt: Some(attempt[am].clone()),
                    is_correct: true,
                });
            }
            oi = om + 1;
            ai = am + 1;
        }

        out
    }
}

/// Emit unmatched words between two anchors.
fn push_gap(out: &mut Vec<WordComparison>, original: &[NormalizedWord], attempt: &[NormalizedWord]) {
    let len = original.len().max(attempt.len());
    for i in 0..len {
        out.push(WordComparison {
            position: out.len(),
            original: original.get(i).cloned(),
            attempt: attempt.get(i).cloned(),
            is_correct: false,
        });
    }
}

/// Index pairs of one longest common subsequence, in ascending order.
fn lcs_anchors(
    original: &[NormalizedWord],
    attempt: &[NormalizedWord],
    matcher: &dyn WordMatcher,
) -> Vec<(usize, usize)> {
    let (n, m) = (original.len(), attempt.len());
    // table[i][j] = LCS length of original[i..] and attempt[j..]
    let mut table = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if matcher.matches(&original[i], &attempt[j]) {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut anchors = Vec::with_capacity(table[0][0] as usize);
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if matcher.matches(&original[i], &attempt[j]) && table[i][j] == table[i + 1][j + 1] + 1 {
            anchors.push((i, j));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::scoring_words;

    fn correct(comparisons: &[WordComparison]) -> usize {
        comparisons.iter().filter(|c| c.is_correct).count()
    }

    fn originals(comparisons: &[WordComparison]) -> Vec<String> {
        comparisons
            .iter()
            .filter_map(|c| c.original.as_ref().map(|w| w.to_string()))
            .collect()
    }

    #[test]
    fn positional_identical() {
        let words = scoring_words("the quick brown fox");
        let result = PositionalAligner.align(&words, &words, &ExactMatcher);
        assert_eq!(result.len(), 4);
        assert_eq!(correct(&result), 4);
    }

    #[test]
    fn positional_short_attempt_pads_with_none() {
        let original = scoring_words("one two three");
        let attempt = scoring_words("one");
        let result = PositionalAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(result.len(), 3);
        assert!(result[0].is_correct);
        assert_eq!(result[2].attempt, None);
        assert!(!result[2].is_correct);
    }

    #[test]
    fn positional_long_attempt_reports_extras() {
        let original = scoring_words("one");
        let attempt = scoring_words("one two three");
        let result = PositionalAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(result.len(), 3);
        assert_eq!(result[1].original, None);
        assert_eq!(correct(&result), 1);
    }

    #[test]
    fn positional_dropped_word_desynchronizes() {
        let original = scoring_words("a b c d");
        let attempt = scoring_words("b c d");
        let result = PositionalAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(correct(&result), 0);
    }

    #[test]
    fn sequence_recovers_from_dropped_word() {
        let original = scoring_words("a b c d");
        let attempt = scoring_words("b c d");
        let result = SequenceAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(correct(&result), 3);
        assert_eq!(result[0].original.as_ref().unwrap().as_str(), "a");
        assert_eq!(result[0].attempt, None);
    }

    #[test]
    fn sequence_pairs_substitutions_in_gaps() {
        let original = scoring_words("the red fox ran");
        let attempt = scoring_words("the blue fox ran");
        let result = SequenceAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(result.len(), 4);
        assert!(!result[1].is_correct);
        assert_eq!(result[1].original.as_ref().unwrap().as_str(), "red");
        assert_eq!(result[1].attempt.as_ref().unwrap().as_str(), "blue");
    }

    #[test]
    fn sequence_keeps_every_original_word_in_order() {
        let original = scoring_words("we hold these truths to be selfevident");
        let attempt = scoring_words("these truths are selfevident indeed");
        let result = SequenceAligner.align(&original, &attempt, &ExactMatcher);
        assert_eq!(
            originals(&result),
            vec!["we", "hold", "these", "truths", "to", "be", "selfevident"]
        );
        assert_eq!(correct(&result), 3);
        for (i, c) in result.iter().enumerate() {
            assert_eq!(c.position, i);
        }
    }

    #[test]
    fn sequence_handles_empty_sides() {
        let words = scoring_words("a b");
        assert_eq!(SequenceAligner.align(&words, &[], &ExactMatcher).len(), 2);
        assert_eq!(SequenceAligner.align(&[], &words, &ExactMatcher).len(), 2);
        assert!(SequenceAligner.align(&[], &[], &ExactMatcher).is_empty());
    }

    #[test]
    fn strategy_parse_and_display() {
        assert_eq!(
            "positional".parse::<AlignmentStrategy>().unwrap(),
            AlignmentStrategy::Positional
        );
        assert_eq!(
            "LCS".parse::<AlignmentStrategy>().unwrap(),
            AlignmentStrategy::Sequence
        );
        assert_eq!(AlignmentStrategy::Sequence.to_string(), "sequence");
        assert!(matches!(
            "fuzzy".parse::<AlignmentStrategy>(),
            Err(ConfigError::UnknownAlignment(_))
        ));
        assert_eq!(AlignmentStrategy::Sequence.aligner().name(), "sequence");
    }
}
