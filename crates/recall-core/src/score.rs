//! Score combination and missing/incorrect word lists.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalize::NormalizedWord;

/// Default share of the final score taken by content accuracy.
pub const DEFAULT_CONTENT_WEIGHT: f64 = 0.8;
/// Default share of the final score taken by format fidelity.
pub const DEFAULT_FORMAT_WEIGHT: f64 = 0.2;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Blend of content accuracy and format fidelity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    content: f64,
    format: f64,
}

impl ScoringWeights {
    /// Validated weights: each finite and non-negative, summing to 1.
    pub fn new(content: f64, format: f64) -> Result<Self, ConfigError> {
        for (name, value) in [("content", content), ("format", format)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = content + format;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(Self { content, format })
    }

    pub fn content(&self) -> f64 {
        self.content
    }

    pub fn format(&self) -> f64 {
        self.format
    }

    /// `round(content * w_content + format * w_format)`, clamped to `0..=100`.
    pub fn combine(&self, content_accuracy: f64, format_accuracy: f64) -> u8 {
        let blended = content_accuracy * self.content + format_accuracy * self.format;
        if blended.is_nan() {
            return 0;
        }
        blended.round().clamp(0.0, 100.0) as u8
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            content: DEFAULT_CONTENT_WEIGHT,
            format: DEFAULT_FORMAT_WEIGHT,
        }
    }
}

/// Percentage of passage words credited, 0 for an empty passage.
pub fn content_accuracy(correct_words: usize, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    correct_words as f64 / total_words as f64 * 100.0
}

/// How missing/incorrect word lists treat repeated words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordListMode {
    /// Plain set difference; each word listed once, duplicates ignored.
    #[default]
    Set,
    /// Count-aware difference; surplus occurrences are each listed.
    Multiset,
}

impl WordListMode {
    /// Words of `left` not accounted for by `right`, in `left` order.
    pub fn difference(self, left: &[NormalizedWord], right: &[NormalizedWord]) -> Vec<NormalizedWord> {
        match self {
            WordListMode::Set => set_difference(left, right),
            WordListMode::Multiset => multiset_difference(left, right),
        }
    }
}

fn set_difference(left: &[NormalizedWord], right: &[NormalizedWord]) -> Vec<NormalizedWord> {
    let exclude: HashSet<&NormalizedWord> = right.iter().collect();
    let mut seen = HashSet::new();
    left.iter()
        .filter(|w| !exclude.contains(w) && seen.insert(*w))
        .cloned()
        .collect()
}

fn multiset_difference(left: &[NormalizedWord], right: &[NormalizedWord]) -> Vec<NormalizedWord> {
    let mut available: HashMap<&NormalizedWord, usize> = HashMap::new();
    for w in right {
        *available.entry(w).or_default() += 1;
    }
    left.iter()
        .filter(|w| match available.get_mut(*w) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}
