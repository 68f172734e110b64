//! Secure LRU - A thread-safe fixed-capacity LRU cache
//!
//! Maps `i64` keys to `i64` values with O(1) lookup, promotion, and eviction,
//! guarded by a single reader-writer lock.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, LruCache, Snapshot};
pub use config::Config;
pub use error::{CacheError, Result};
