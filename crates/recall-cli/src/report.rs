//! JSON envelope for a scored attempt.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use recall_core::ComparisonResult;

use crate::feedback::{Grade, PASSING_ACCURACY};

/// One scored attempt, as written by `recall compare --format json`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub id: Uuid,
    pub scored_at: DateTime<Utc>,
    pub passage: PathBuf,
    pub alignment: String,
    pub grade: Grade,
    pub passed: bool,
    pub result: ComparisonResult,
}

impl ScoreReport {
    pub fn new(passage: PathBuf, alignment: String, result: ComparisonResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            scored_at: Utc::now(),
            passage,
            alignment,
            grade: Grade::from_accuracy(result.accuracy),
            passed: result.accuracy >= PASSING_ACCURACY,
            result,
        }
    }
}
