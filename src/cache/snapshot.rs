//! Snapshot Module
//!
//! Point-in-time, read-only projection of cache contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Snapshot ==
/// Full cache state captured under a single lock acquisition.
///
/// `items` is keyed in ascending key order so serialized output is stable;
/// `order` carries recency, most recently used first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capacity bound at capture time
    pub capacity: usize,
    /// Number of live entries at capture time
    pub size: usize,
    /// Key to value mapping
    pub items: BTreeMap<i64, i64>,
    /// Keys from most to least recently used
    pub order: Vec<i64>,
}

impl Snapshot {
    // == To JSON ==
    /// Encodes the snapshot as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    // == To Pretty JSON ==
    /// Encodes the snapshot as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
