//! TOML drill sets.
//!
//! A drill set pairs passages with recorded attempts and the scores they are
//! expected to earn. Drill sets pin scoring behavior across changes to the
//! engine and its configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::align::AlignmentStrategy;
use crate::config::EngineConfig;
use crate::engine::ComparisonEngine;
use crate::error::ConfigError;
use crate::fuzzy::{DistanceCache, LruDistanceCache};

/// A named collection of drill cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Alignment for cases that don't specify one.
    #[serde(default)]
    pub alignment: Option<AlignmentStrategy>,
    #[serde(default)]
    pub cases: Vec<DrillCase>,
}

/// One passage/attempt pair and its expected outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillCase {
    pub id: String,
    pub passage: String,
    pub attempt: String,
    #[serde(default)]
    pub expected_accuracy: Option<u8>,
    #[serde(default)]
    pub expected_correct_words: Option<usize>,
    #[serde(default)]
    pub alignment: Option<AlignmentStrategy>,
}

#[derive(Debug, Deserialize)]
struct TomlDrillFile {
    drill_set: TomlDrillHeader,
    #[serde(default)]
    cases: Vec<DrillCase>,
}

#[derive(Debug, Deserialize)]
struct TomlDrillHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    alignment: Option<AlignmentStrategy>,
}

/// Parse a single TOML file into a `DrillSet`.
pub fn parse_drill_set(path: &Path) -> Result<DrillSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read drill set file: {}", path.display()))?;

    parse_drill_set_str(&content, path)
}

/// Parse a TOML string into a `DrillSet`.
pub fn parse_drill_set_str(content: &str, source_path: &Path) -> Result<DrillSet> {
    let parsed: TomlDrillFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(DrillSet {
        id: parsed.drill_set.id,
        name: parsed.drill_set.name,
        description: parsed.drill_set.description,
        alignment: parsed.drill_set.alignment,
        cases: parsed.cases,
    })
}

/// Recursively load all `.toml` drill set files from a directory.
pub fn load_drill_directory(dir: &Path) -> Result<Vec<DrillSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_drill_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_drill_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a drill set file, or every drill set under a directory.
pub fn load_drills(path: &Path) -> Result<Vec<DrillSet>> {
    if path.is_dir() {
        load_drill_directory(path)
    } else {
        Ok(vec![parse_drill_set(path)?])
    }
}

/// A warning from drill set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub case_id: Option<String>,
    pub message: String,
}

/// Validate a drill set for common issues.
pub fn validate_drill_set(set: &DrillSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for case in &set.cases {
        if !seen_ids.insert(&case.id) {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: format!("duplicate case ID: {}", case.id),
            });
        }
    }

    for case in &set.cases {
        if case.passage.trim().is_empty() {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: "passage is empty".into(),
            });
        }
        if case.expected_accuracy.is_some_and(|a| a > 100) {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: "expected_accuracy is above 100".into(),
            });
        }
        if case.expected_accuracy.is_none() && case.expected_correct_words.is_none() {
            warnings.push(ValidationWarning {
                case_id: Some(case.id.clone()),
                message: "no expectations set; case always passes".into(),
            });
        }
    }

    if set.cases.is_empty() {
        warnings.push(ValidationWarning {
            case_id: None,
            message: "drill set has no cases".into(),
        });
    }

    warnings
}

/// Result of running one drill case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillOutcome {
    pub set_id: String,
    pub case_id: String,
    pub alignment: AlignmentStrategy,
    pub accuracy: u8,
    pub correct_words: usize,
    pub total_words: usize,
    /// Human-readable expectation mismatches; empty when the case passed.
    pub failures: Vec<String>,
}

impl DrillOutcome {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Score every case of `set` under `config`, honoring per-case alignment.
pub fn run_drill_set(set: &DrillSet, config: &EngineConfig) -> Result<Vec<DrillOutcome>, ConfigError> {
    let cache: Arc<dyn DistanceCache> = Arc::new(LruDistanceCache::new(config.cache.capacity));
    let mut outcomes = Vec::with_capacity(set.cases.len());

    for case in &set.cases {
        let alignment = case
            .alignment
            .or(set.alignment)
            .unwrap_or(config.scoring.alignment);
        let mut case_config = config.clone();
        case_config.scoring.alignment = alignment;
        let engine = ComparisonEngine::from_config_with_cache(&case_config, Arc::clone(&cache))?;

        let result = engine.compare(&case.passage, &case.attempt);

        let mut failures = Vec::new();
        if let Some(expected) = case.expected_accuracy {
            if result.accuracy != expected {
                failures.push(format!(
                    "accuracy {} != expected {}",
                    result.accuracy, expected
                ));
            }
        }
        if let Some(expected) = case.expected_correct_words {
            if result.correct_words != expected {
                failures.push(format!(
                    "correct_words {} != expected {}",
                    result.correct_words, expected
                ));
            }
        }

        outcomes.push(DrillOutcome {
            set_id: set.id.clone(),
            case_id: case.id.clone(),
            alignment,
            accuracy: result.accuracy,
            correct_words: result.correct_words,
            total_words: result.total_words,
            failures,
        });
    }

    Ok(outcomes)
}
