//! Cache Entry Module
//!
//! Defines the arena node holding one key/value pair and its list links.

// == Handle ==
/// Stable index of a node inside the recency list arena.
pub type Handle = usize;

/// Arena slot of the head sentinel (most recently used side).
pub const HEAD: Handle = 0;

/// Arena slot of the tail sentinel (least recently used side).
pub const TAIL: Handle = 1;

// == Cache Entry ==
/// A single cached key/value pair linked into the recency list.
///
/// Links are arena handles, never references, so the list and the index can
/// both name an entry without sharing ownership of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Key, unique within the cache
    pub key: i64,
    /// Stored value, overwritten in place on update
    pub value: i64,
    /// Neighbour towards the head
    pub(crate) prev: Handle,
    /// Neighbour towards the tail
    pub(crate) next: Handle,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: i64, value: i64) -> Self {
        Self {
            key,
            value,
            prev: HEAD,
            next: TAIL,
        }
    }

    // == Sentinel ==
    /// Creates a boundary node. Sentinels carry no data and are never indexed.
    pub(crate) fn sentinel() -> Self {
        Self {
            key: -1,
            value: -1,
            prev: HEAD,
            next: TAIL,
        }
    }
}
