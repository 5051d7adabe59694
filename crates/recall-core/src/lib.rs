//! recall-core — Recall comparison and scoring engine.
//!
//! This crate compares a canonical passage against a learner's free-form
//! reconstruction and produces an accuracy score plus the token and word
//! diffs a renderer needs to paint feedback.

pub mod align;
pub mod config;
pub mod drill;
pub mod engine;
pub mod error;
pub mod format;
pub mod fuzzy;
pub mod normalize;
pub mod results;
pub mod score;
pub mod token;

pub use engine::{compare, ComparisonEngine};
pub use results::ComparisonResult;
