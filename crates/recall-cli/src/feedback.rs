//! Learner-facing wording for a score.

use std::fmt;

use serde::Serialize;

/// Accuracy needed to treat a passage as learned.
pub const PASSING_ACCURACY: u8 = 80;

/// Coarse description of an accuracy score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
    KeepPracticing,
}

impl Grade {
    pub fn from_accuracy(accuracy: u8) -> Self {
        match accuracy {
            95.. => Grade::Excellent,
            90..=94 => Grade::VeryGood,
            80..=89 => Grade::Good,
            70..=79 => Grade::Fair,
            60..=69 => Grade::NeedsImprovement,
            _ => Grade::KeepPracticing,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::Excellent => "Excellent",
            Grade::VeryGood => "Very Good",
            Grade::Good => "Good",
            Grade::Fair => "Fair",
            Grade::NeedsImprovement => "Needs Improvement",
            Grade::KeepPracticing => "Keep Practicing",
        };
        f.write_str(label)
    }
}

pub fn encouragement(accuracy: u8) -> &'static str {
    if accuracy >= PASSING_ACCURACY {
        "Great job! You've mastered this passage."
    } else if accuracy >= 60 {
        "Good effort! A little more practice and you'll have it memorized."
    } else {
        "Keep practicing! Memory takes time and repetition."
    }
}
