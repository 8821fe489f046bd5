//! Eviction Policy Module
//!
//! The closed set of eviction strategies and the interface they share.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheEntry, LruSelector, RandomSelector};

// == Victim Selector ==
/// Picks the next entry to evict when the cache is under capacity pressure.
///
/// Returns `None` only when `entries` is empty.
pub trait VictimSelector: Send + fmt::Debug {
    fn select_victim(&mut self, entries: &HashMap<String, CacheEntry>) -> Option<String>;
}

// == Eviction Policy ==
/// Eviction policy, fixed when the cache is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvictionPolicy {
    /// Evict the least recently accessed entry
    #[default]
    Lru,
    /// Evict an entry chosen uniformly at random
    Random,
}

impl EvictionPolicy {
    /// Builds the selector implementing this policy.
    pub fn selector(self) -> Box<dyn VictimSelector> {
        match self {
            EvictionPolicy::Lru => Box::new(LruSelector::new()),
            EvictionPolicy::Random => Box::new(RandomSelector::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvictionPolicy::Lru => "LRU",
            EvictionPolicy::Random => "RANDOM",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(EvictionPolicy::Lru),
            "RANDOM" => Ok(EvictionPolicy::Random),
            other => Err(format!("Unknown eviction policy: {}", other)),
        }
    }
}
