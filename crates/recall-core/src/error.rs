//! Engine configuration errors.
//!
//! Scoring itself never fails: every pair of strings yields a result. These
//! errors only surface when an engine is built from invalid settings.

use thiserror::Error;

/// Errors raised while validating engine settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A scoring weight is negative, NaN or infinite.
    #[error("invalid {name} weight: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// Content and format weights must add up to one.
    #[error("scoring weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    /// Fuzzy similarity threshold outside `(0, 1]`.
    #[error("fuzzy threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    /// Unrecognised alignment strategy name.
    #[error("unknown alignment strategy: {0}")]
    UnknownAlignment(String),
}

impl ConfigError {
    /// Returns `true` if the error concerns the score weighting policy.
    pub fn is_weighting(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidWeight { .. } | ConfigError::WeightSum(_)
        )
    }
}
