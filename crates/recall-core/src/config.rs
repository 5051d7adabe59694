//! Engine configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::align::AlignmentStrategy;
use crate::error::ConfigError;
use crate::fuzzy::DEFAULT_CACHE_CAPACITY;
use crate::score::{ScoringWeights, WordListMode, DEFAULT_CONTENT_WEIGHT, DEFAULT_FORMAT_WEIGHT};

/// Environment variable overriding `scoring.alignment`.
pub const ENV_ALIGNMENT: &str = "RECALL_ALIGNMENT";
/// Environment variable overriding `scoring.fuzzy_threshold`.
pub const ENV_FUZZY_THRESHOLD: &str = "RECALL_FUZZY_THRESHOLD";

/// Top-level configuration, as read from `recall.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Share of the final score taken by content accuracy.
    #[serde(default = "default_content_weight")]
    pub content_weight: f64,
    /// Share of the final score taken by format fidelity.
    #[serde(default = "default_format_weight")]
    pub format_weight: f64,
    /// How passage and attempt words are paired.
    #[serde(default)]
    pub alignment: AlignmentStrategy,
    /// Set or multiset semantics for missing/incorrect lists.
    #[serde(default)]
    pub word_lists: WordListMode,
    /// Credit near-miss spellings at this similarity (None = exact only).
    #[serde(default)]
    pub fuzzy_threshold: Option<f64>,
}

fn default_content_weight() -> f64 {
    DEFAULT_CONTENT_WEIGHT
}
fn default_format_weight() -> f64 {
    DEFAULT_FORMAT_WEIGHT
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            content_weight: DEFAULT_CONTENT_WEIGHT,
            format_weight: DEFAULT_FORMAT_WEIGHT,
            alignment: AlignmentStrategy::default(),
            word_lists: WordListMode::default(),
            fuzzy_threshold: None,
        }
    }
}

/// Edit-distance cache sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum memoized word pairs; 0 disables the cache.
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content).context("failed to parse config TOML")?;
        Ok(config)
    }

    /// Validated scoring weights.
    pub fn weights(&self) -> Result<ScoringWeights, ConfigError> {
        ScoringWeights::new(self.scoring.content_weight, self.scoring.format_weight)
    }

    /// Check every setting without building an engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights()?;
        if let Some(t) = self.scoring.fuzzy_threshold {
            if !(t > 0.0 && t <= 1.0) {
                return Err(ConfigError::InvalidThreshold(t));
            }
        }
        Ok(())
    }

    /// Apply overrides from a variable lookup (normally the process env).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ALIGNMENT) {
            self.scoring.alignment = value
                .parse::<AlignmentStrategy>()
                .with_context(|| format!("invalid {ENV_ALIGNMENT}"))?;
        }
        if let Some(value) = lookup(ENV_FUZZY_THRESHOLD) {
            let threshold: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_FUZZY_THRESHOLD}: {value}"))?;
            self.scoring.fuzzy_threshold = Some(threshold);
        }
        Ok(())
    }
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order when no path is given:
/// 1. `recall.toml` in the current directory
/// 2. `~/.config/recall/config.toml`
///
/// Environment variable overrides: `RECALL_ALIGNMENT`, `RECALL_FUZZY_THRESHOLD`.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Like [`load_config_from`], with overrides read through `lookup`.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<EngineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("recall.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            EngineConfig::from_toml_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    config.apply_overrides(lookup)?;
    if let Err(e) = config.validate() {
        if e.is_weighting() {
            return Err(anyhow::Error::new(e)
                .context("check [scoring] content_weight and format_weight"));
        }
        return Err(e.into());
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("recall"))
}
