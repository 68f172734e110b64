//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;

/// Default number of entries the cache can hold.
pub const DEFAULT_CAPACITY: usize = 2;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Whether hit/miss/eviction counters are recorded
    pub enable_metrics: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LRU_CAPACITY` - Maximum cache entries (default: 2)
    /// - `LRU_ENABLE_METRICS` - Record statistics counters (default: true)
    ///
    /// Values that fail to parse fall back to their defaults. A capacity of
    /// zero is passed through unchanged and rejected when the cache is built.
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("LRU_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            enable_metrics: env::var("LRU_ENABLE_METRICS")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            enable_metrics: true,
        }
    }
}

/// Parses a boolean-ish environment value.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
