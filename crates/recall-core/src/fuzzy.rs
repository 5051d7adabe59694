//! Edit-distance near-match detection.
//!
//! Not used by the default scoring path. Configure a fuzzy threshold to make
//! the engine credit near-miss spellings; see [`FuzzyMatcher`].
//!
//! Distances are memoized in a [`DistanceCache`] keyed by the ordered word
//! pair. The cache is injected, never global, so a long-running service can
//! cap it and tests can isolate it.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::align::WordMatcher;
use crate::error::ConfigError;
use crate::normalize::NormalizedWord;

/// Default similarity threshold for near matches.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Default number of word pairs kept by [`LruDistanceCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Levenshtein distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Memo store for pairwise edit distances.
pub trait DistanceCache: Send + Sync {
    fn get(&self, a: &str, b: &str) -> Option<usize>;
    fn insert(&self, a: &str, b: &str, distance: usize);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl DistanceCache for NoCache {
    fn get(&self, _: &str, _: &str) -> Option<usize> {
        None
    }
    fn insert(&self, _: &str, _: &str, _: usize) {}
    fn len(&self) -> usize {
        0
    }
}

/// Capacity-bounded cache with least-recently-used eviction.
///
/// A capacity of zero disables storage.
#[derive(Debug)]
pub struct LruDistanceCache {
    capacity: usize,
    entries: Mutex<IndexMap<(String, String), usize>>,
}

impl LruDistanceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity.min(1024))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for LruDistanceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl DistanceCache for LruDistanceCache {
    fn get(&self, a: &str, b: &str) -> Option<usize> {
        let mut entries = self.entries.lock();
        let index = entries.get_index_of(&(a.to_string(), b.to_string()))?;
        // Most recently used entries live at the back.
        let last = entries.len() - 1;
        entries.move_index(index, last);
        entries.get_index(last).map(|(_, d)| *d)
    }

    fn insert(&self, a: &str, b: &str, distance: usize) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock();
        let key = (a.to_string(), b.to_string());
        if entries.contains_key(&key) {
            return;
        }
        while entries.len() >= self.capacity {
            if let Some(((ea, eb), _)) = entries.shift_remove_index(0) {
                tracing::trace!(a = %ea, b = %eb, "evicted edit distance");
            }
        }
        entries.insert(key, distance);
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Near-match test: `1 - distance / max_len >= threshold`.
#[derive(Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
    cache: Arc<dyn DistanceCache>,
}

impl std::fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("threshold", &self.threshold)
            .field("cached_pairs", &self.cache.len())
            .finish()
    }
}

impl FuzzyMatcher {
    /// Matcher with its own default-capacity LRU cache.
    pub fn new(threshold: f64) -> Result<Self, ConfigError> {
        Self::with_cache(threshold, Arc::new(LruDistanceCache::default()))
    }

    /// Matcher backed by a caller-supplied cache, which may be shared.
    pub fn with_cache(threshold: f64, cache: Arc<dyn DistanceCache>) -> Result<Self, ConfigError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold, cache })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn cache(&self) -> &Arc<dyn DistanceCache> {
        &self.cache
    }

    /// Memoized edit distance.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        if let Some(d) = self.cache.get(a, b) {
            return d;
        }
        let d = edit_distance(a, b);
        self.cache.insert(a, b, d);
        d
    }

    /// Similarity in `[0, 1]`; two empty words are identical.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        1.0 - self.distance(a, b) as f64 / max_len as f64
    }

    pub fn is_similar(&self, a: &str, b: &str) -> bool {
        self.similarity(a, b) >= self.threshold
    }
}

impl WordMatcher for FuzzyMatcher {
    fn matches(&self, original: &NormalizedWord, attempt: &NormalizedWord) -> bool {
        self.is_similar(original.as_str(), attempt.as_str())
    }
}
