//! Memoized layout results keyed by the content of the input.
//!
//! A layout is a pure function of (entries, config), so a result can be reused
//! whenever the same entry set is laid out again, e.g. on a re-render that did
//! not touch the data. Any change to any entry changes the key, which gives
//! whole-set invalidation for free.

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};

use crate::config::{ConfigError, LayoutConfig};
use crate::layout::layout_entries;
use crate::log_debug;
use crate::models::{Entry, LayoutResult};

/// Content hash of an entry sequence and the config it is laid out with.
///
/// Entries are hashed in input order: which duplicate survives and the order
/// of rejections both follow input order, so a permutation is a different key.
pub fn content_key(entries: &[Entry], config: &LayoutConfig) -> u64 {
    let mut hasher = FxHasher::default();
    entries.len().hash(&mut hasher);
    for entry in entries {
        entry.hash(&mut hasher);
    }
    config.hash(&mut hasher);
    hasher.finish()
}

/// Bounded cache of layout results.
///
/// Eviction is wholesale: once `capacity` keys are held, the next miss clears
/// the map. Keys for a day view are few, so this is rarely hit.
pub struct LayoutCache {
    results: FxHashMap<u64, LayoutResult>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl LayoutCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Same output as [`layout_entries`], reusing a previous result when the
    /// content key matches.
    pub fn layout(
        &mut self,
        entries: &[Entry],
        config: &LayoutConfig,
    ) -> Result<LayoutResult, ConfigError> {
        let key = content_key(entries, config);
        if let Some(cached) = self.results.get(&key) {
            self.hits += 1;
            log_debug!(config.verbosity, "Layout cache hit ({:016x})", key);
            return Ok(cached.clone());
        }

        // Errors are not cached; a bad config fails fast anyway
        let result = layout_entries(entries, config)?;
        self.misses += 1;
        if self.results.len() >= self.capacity {
            self.results.clear();
        }
        self.results.insert(key, result.clone());
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
