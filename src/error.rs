//! Error types for the LRU cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// A missing key is not an error: lookups report absence through
/// `Option`/`bool` return values instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Requested capacity is below the minimum of one entry
    #[error("Invalid capacity: {0} (capacity must be at least 1)")]
    InvalidCapacity(usize),

    /// Cache is at capacity and no entry could be evicted
    #[error("Cache is full and cannot evict")]
    CacheFull,

    /// Snapshot could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
