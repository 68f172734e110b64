//! Cache Module
//!
//! Provides a thread-safe, fixed-capacity LRU cache with O(1) lookup,
//! promotion, and eviction.

mod entry;
mod lru;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use snapshot::Snapshot;
pub use stats::CacheStats;
pub use store::LruCache;

pub(crate) use lru::RecencyList;
