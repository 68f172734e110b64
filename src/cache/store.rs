//! Cache Store Module
//!
//! Main cache engine combining a hash index with the arena recency list,
//! guarded by a single reader-writer lock.

use std::collections::HashMap;
use std::ops::ControlFlow;

use ahash::RandomState;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::cache::entry::Handle;
use crate::cache::stats::Counters;
use crate::cache::{CacheStats, RecencyList, Snapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == Cache Core ==
/// Unsynchronized state. Only reachable through the lock in [`LruCache`].
#[derive(Debug)]
struct CacheCore {
    /// Key to arena handle
    index: HashMap<i64, Handle, RandomState>,
    /// Entries ordered most to least recently used
    list: RecencyList,
    /// Maximum number of live entries
    capacity: usize,
    /// Hit/miss/eviction counters
    counters: Counters,
}

impl CacheCore {
    fn new(capacity: usize, enable_metrics: bool) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            index: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            list: RecencyList::with_capacity(reserve),
            capacity,
            counters: Counters::new(enable_metrics),
        }
    }

    /// Promoting lookup shared by `get` and `get_or_default`.
    fn lookup(&mut self, key: i64) -> Option<i64> {
        match self.index.get(&key) {
            Some(&handle) => {
                self.list.move_to_front(handle);
                self.counters.record_hit();
                Some(self.list.get(handle).value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    /// Drops the least recently used entry from both structures.
    fn evict_oldest(&mut self) -> Option<i64> {
        let evicted = self.list.pop_back()?;
        self.index.remove(&evicted.key);
        self.counters.record_eviction();
        debug!(key = evicted.key, "evicted least recently used entry");
        Some(evicted.key)
    }
}

// == LRU Cache ==
/// Thread-safe fixed-capacity LRU cache of `i64` keys to `i64` values.
///
/// Pure reads (`contains`, `peek`, `len`, `capacity`, snapshots) share the
/// lock. Anything that reorders, mutates, inserts, or evicts takes it
/// exclusively, including `get`, since promotion rewrites list links.
#[derive(Debug)]
pub struct LruCache {
    inner: RwLock<CacheCore>,
}

impl LruCache {
    // == Constructors ==
    /// Creates an empty cache with metrics disabled.
    ///
    /// # Errors
    /// `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::build(capacity, false)
    }

    /// Creates an empty cache that records hit/miss/eviction counters.
    pub fn with_metrics(capacity: usize) -> Result<Self> {
        Self::build(capacity, true)
    }

    /// Creates an empty cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(config.capacity, config.enable_metrics)
    }

    fn build(capacity: usize, enable_metrics: bool) -> Result<Self> {
        validate_capacity(capacity)?;
        debug!(capacity, enable_metrics, "creating LRU cache");
        Ok(Self {
            inner: RwLock::new(CacheCore::new(capacity, enable_metrics)),
        })
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    ///
    /// Absent keys count as a miss and leave the order untouched.
    pub fn get(&self, key: i64) -> Option<i64> {
        self.inner.write().lookup(key)
    }

    // == Get Or Default ==
    /// Like [`get`](Self::get), returning `default` when the key is absent.
    ///
    /// Counts hits and misses exactly as `get` does.
    pub fn get_or_default(&self, key: i64, default: i64) -> i64 {
        self.inner.write().lookup(key).unwrap_or(default)
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency or counters.
    pub fn peek(&self, key: i64) -> Option<i64> {
        let core = self.inner.read();
        core.index.get(&key).map(|&h| core.list.get(h).value)
    }

    // == Put ==
    /// Stores `value` under `key` at the most recently used position.
    ///
    /// An existing key is updated in place. A new key arriving at a full
    /// cache evicts the least recently used entry first.
    ///
    /// # Errors
    /// `CacheFull` if the cache is at capacity and nothing can be evicted.
    pub fn put(&self, key: i64, value: i64) -> Result<()> {
        let mut core = self.inner.write();

        if let Some(&handle) = core.index.get(&key) {
            core.list.get_mut(handle).value = value;
            core.list.move_to_front(handle);
            return Ok(());
        }

        if core.index.len() >= core.capacity && core.evict_oldest().is_none() {
            return Err(CacheError::CacheFull);
        }

        let handle = core.list.push_front(key, value);
        core.index.insert(key, handle);
        Ok(())
    }

    // == Contains ==
    /// Checks whether `key` is cached, without promoting it.
    pub fn contains(&self, key: i64) -> bool {
        self.inner.read().index.contains_key(&key)
    }

    // == Remove ==
    /// Deletes `key`. Returns false if it was not cached.
    pub fn remove(&self, key: i64) -> bool {
        let mut core = self.inner.write();
        match core.index.remove(&key) {
            Some(handle) => {
                core.list.remove(handle);
                true
            }
            None => false,
        }
    }

    // == Resize ==
    /// Changes the capacity bound, evicting oldest entries if it shrinks
    /// below the current size.
    ///
    /// # Errors
    /// `InvalidCapacity` when `new_capacity` is zero; the cache is unchanged.
    pub fn resize(&self, new_capacity: usize) -> Result<()> {
        validate_capacity(new_capacity)?;

        let mut core = self.inner.write();
        let mut evicted = 0usize;
        while core.index.len() > new_capacity {
            if core.evict_oldest().is_none() {
                break;
            }
            evicted += 1;
        }

        let old_capacity = core.capacity;
        core.capacity = new_capacity;
        info!(old_capacity, new_capacity, evicted, "resized LRU cache");
        Ok(())
    }

    // == Clear ==
    /// Removes every entry. Counters and capacity are kept.
    pub fn clear(&self) {
        let mut core = self.inner.write();
        let dropped = core.index.len();
        core.index.clear();
        core.list.clear();
        info!(dropped, "cleared LRU cache");
    }

    // == Accessors ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.read().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().index.is_empty()
    }

    /// Returns the current capacity bound.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity
    }

    pub fn metrics_enabled(&self) -> bool {
        self.inner.read().counters.enabled()
    }

    // == Keys / Values ==
    /// Copies all keys, most recently used first.
    pub fn keys(&self) -> Vec<i64> {
        self.inner.read().list.iter().map(|e| e.key).collect()
    }

    /// Copies all values, most recently used first.
    pub fn values(&self) -> Vec<i64> {
        self.inner.read().list.iter().map(|e| e.value).collect()
    }

    // == Range ==
    /// Calls `visitor` for each `(key, value)` pair, most recently used first.
    ///
    /// Pairs are copied out before the first call, so the visitor runs with
    /// the lock released and never sees concurrent mutations. Returning
    /// `ControlFlow::Break` stops the walk.
    pub fn range<F>(&self, mut visitor: F)
    where
        F: FnMut(i64, i64) -> ControlFlow<()>,
    {
        let pairs: Vec<(i64, i64)> = {
            let core = self.inner.read();
            core.list.iter().map(|e| (e.key, e.value)).collect()
        };

        for (key, value) in pairs {
            if visitor(key, value).is_break() {
                break;
            }
        }
    }

    // == Dump ==
    /// Captures capacity, size, items, and recency order in one instant.
    pub fn dump(&self) -> Snapshot {
        let core = self.inner.read();
        let mut snapshot = Snapshot {
            capacity: core.capacity,
            size: core.index.len(),
            order: Vec::with_capacity(core.index.len()),
            ..Snapshot::default()
        };
        for entry in core.list.iter() {
            snapshot.items.insert(entry.key, entry.value);
            snapshot.order.push(entry.key);
        }
        snapshot
    }

    /// Serializes [`dump`](Self::dump) as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        self.dump().to_json()
    }

    /// Serializes [`dump`](Self::dump) as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        self.dump().to_json_pretty()
    }

    // == Stats ==
    /// Returns cumulative counters plus current size and capacity.
    pub fn stats(&self) -> CacheStats {
        let core = self.inner.read();
        core.counters.snapshot(core.index.len(), core.capacity)
    }

    /// Panics if the index and list disagree or the capacity bound is broken.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        use std::collections::HashSet;

        let core = self.inner.read();
        let listed: Vec<i64> = core.list.iter().map(|e| e.key).collect();
        let unique: HashSet<i64> = listed.iter().copied().collect();
        let indexed: HashSet<i64> = core.index.keys().copied().collect();

        assert_eq!(listed.len(), core.list.len(), "list length drifted");
        assert_eq!(unique.len(), listed.len(), "key linked twice");
        assert_eq!(unique, indexed, "index and list key sets differ");
        assert!(core.index.len() <= core.capacity, "capacity exceeded");
        for (&key, &handle) in &core.index {
            let entry = core.list.get(handle);
            assert_eq!(entry.key, key, "index points at wrong slot");
            assert_ne!(entry.prev, handle, "entry links to itself");
            assert_ne!(entry.next, handle, "entry links to itself");
        }
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity < 1 {
        return Err(CacheError::InvalidCapacity(capacity));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[i64]) -> LruCache {
        let cache = LruCache::with_metrics(capacity).unwrap();
        for &k in keys {
            cache.put(k, k * 10).unwrap();
        }
        cache
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert!(matches!(
            LruCache::new(0),
            Err(CacheError::InvalidCapacity(0))
        ));
        assert!(matches!(
            LruCache::with_metrics(0),
            Err(CacheError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_new_is_empty() {
        let cache = LruCache::new(4).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 4);
        assert!(cache.keys().is_empty());
        assert!(!cache.metrics_enabled());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            capacity: 5,
            enable_metrics: true,
        };
        let cache = LruCache::from_config(&config).unwrap();
        assert_eq!(cache.capacity(), 5);
        assert!(cache.metrics_enabled());

        let config = Config {
            capacity: 0,
            enable_metrics: false,
        };
        assert!(LruCache::from_config(&config).is_err());
    }

    #[test]
    fn test_put_and_get() {
        let cache = filled(4, &[1, 2]);
        assert_eq!(cache.get(1), Some(10));
        assert_eq!(cache.get(2), Some(20));
        assert_eq!(cache.get(3), None);
        cache.assert_consistent();
    }

    #[test]
    fn test_get_promotes() {
        let cache = filled(3, &[1, 2, 3]);
        assert_eq!(cache.keys(), vec![3, 2, 1]);

        cache.get(1);
        assert_eq!(cache.keys(), vec![1, 3, 2]);
    }

    #[test]
    fn test_put_overwrite_promotes_without_eviction() {
        let cache = filled(2, &[1, 2]);
        cache.put(1, 99).unwrap();

        assert_eq!(cache.keys(), vec![1, 2]);
        assert_eq!(cache.peek(1), Some(99));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_put_evicts_least_recently_used() {
        let cache = filled(3, &[1, 2, 3]);
        cache.get(1);
        cache.put(4, 40).unwrap();

        assert!(!cache.contains(2));
        assert_eq!(cache.keys(), vec![4, 1, 3]);
        assert_eq!(cache.stats().evictions, 1);
        cache.assert_consistent();
    }

    #[test]
    fn test_capacity_one() {
        let cache = filled(1, &[1]);
        cache.put(2, 20).unwrap();
        assert_eq!(cache.keys(), vec![2]);
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.get(2), Some(20));
        cache.assert_consistent();
    }

    #[test]
    fn test_peek_does_not_promote_or_count() {
        let cache = filled(3, &[1, 2, 3]);
        let before = cache.keys();

        assert_eq!(cache.peek(1), Some(10));
        assert_eq!(cache.peek(9), None);
        assert_eq!(cache.keys(), before);

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_get_or_default() {
        let cache = filled(2, &[1, 2]);
        assert_eq!(cache.get_or_default(1, 999), 10);
        assert_eq!(cache.keys(), vec![1, 2]);
        assert_eq!(cache.get_or_default(7, 999), 999);
        assert_eq!(cache.keys(), vec![1, 2]);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_remove() {
        let cache = filled(3, &[1, 2, 3]);
        assert!(cache.remove(2));
        assert!(!cache.remove(2));
        assert_eq!(cache.keys(), vec![3, 1]);
        assert_eq!(cache.stats().evictions, 0);
        cache.assert_consistent();
    }

    #[test]
    fn test_resize_shrink_evicts_oldest_first() {
        let cache = filled(5, &[1, 2, 3, 4, 5]);
        cache.resize(2).unwrap();

        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.keys(), vec![5, 4]);
        assert_eq!(cache.stats().evictions, 3);
        cache.assert_consistent();
    }

    #[test]
    fn test_resize_grow_keeps_entries() {
        let cache = filled(2, &[1, 2]);
        cache.resize(3).unwrap();
        cache.put(3, 30).unwrap();

        assert_eq!(cache.keys(), vec![3, 2, 1]);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_resize_rejects_zero_and_keeps_state() {
        let cache = filled(2, &[1, 2]);
        assert!(matches!(
            cache.resize(0),
            Err(CacheError::InvalidCapacity(0))
        ));
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.keys(), vec![2, 1]);
    }

    #[test]
    fn test_clear_keeps_counters_and_capacity() {
        let cache = filled(2, &[1, 2, 3]);
        cache.get(3);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.size, 0);

        cache.clear();
        assert_eq!(cache.len(), 0);
        cache.put(4, 40).unwrap();
        assert_eq!(cache.keys(), vec![4]);
        cache.assert_consistent();
    }

    #[test]
    fn test_values_follow_recency() {
        let cache = filled(3, &[1, 2, 3]);
        cache.get(2);
        assert_eq!(cache.values(), vec![20, 30, 10]);
    }

    #[test]
    fn test_range_visits_in_order_and_stops() {
        let cache = filled(4, &[1, 2, 3, 4]);

        let mut seen = Vec::new();
        cache.range(|k, v| {
            seen.push((k, v));
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec![(4, 40), (3, 30), (2, 20), (1, 10)]);

        let mut first_two = Vec::new();
        cache.range(|k, _| {
            first_two.push(k);
            if first_two.len() == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(first_two, vec![4, 3]);
    }

    #[test]
    fn test_range_visitor_may_mutate_cache() {
        let cache = filled(3, &[1, 2, 3]);
        let mut visited = 0;
        cache.range(|k, _| {
            cache.remove(k);
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_dump() {
        let cache = filled(3, &[1, 2]);
        cache.get(1);

        let snapshot = cache.dump();
        assert_eq!(snapshot.capacity, 3);
        assert_eq!(snapshot.size, 2);
        assert_eq!(snapshot.order, vec![1, 2]);
        assert_eq!(snapshot.items.get(&1), Some(&10));
        assert_eq!(snapshot.items.get(&2), Some(&20));
    }

    #[test]
    fn test_to_json() {
        let cache = filled(2, &[1, 2]);
        assert_eq!(
            cache.to_json().unwrap(),
            r#"{"capacity":2,"size":2,"items":{"1":10,"2":20},"order":[2,1]}"#
        );
        assert!(cache.to_json_pretty().unwrap().contains('\n'));
    }

    #[test]
    fn test_metrics_disabled_keeps_zero_counters() {
        let cache = LruCache::new(1).unwrap();
        cache.put(1, 1).unwrap();
        cache.put(2, 2).unwrap();
        cache.get(2);
        cache.get(1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 1);
    }
}
