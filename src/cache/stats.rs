//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use serde::{Deserialize, Serialize};

// == Cache Stats ==
/// Cumulative cache metrics plus the current size and bound.
///
/// Counters only move when metrics are enabled on the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups that found their key
    pub hits: u64,
    /// Number of lookups that did not find their key
    pub misses: u64,
    /// Number of entries evicted by `put` or `resize`
    pub evictions: u64,
    /// Current number of entries in the cache
    pub size: usize,
    /// Current capacity bound
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Counters ==
/// Counter set owned by the locked cache core.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    enabled: bool,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Counters {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn record_hit(&mut self) {
        if self.enabled {
            self.hits += 1;
        }
    }

    pub(crate) fn record_miss(&mut self) {
        if self.enabled {
            self.misses += 1;
        }
    }

    pub(crate) fn record_eviction(&mut self) {
        if self.enabled {
            self.evictions += 1;
        }
    }

    /// Combines the counters with the current size and capacity.
    pub(crate) fn snapshot(&self, size: usize, capacity: usize) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size,
            capacity,
        }
    }
}
