//! Random Selector Module
//!
//! Uniform random victim selection, with an optional seed for reproducibility.

use std::collections::HashMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::cache::{CacheEntry, VictimSelector};

// == Random Selector ==
/// Selects a victim uniformly at random from the current key set.
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    // == Constructor ==
    /// Creates a selector seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl VictimSelector for RandomSelector {
    fn select_victim(&mut self, entries: &HashMap<String, CacheEntry>) -> Option<String> {
        entries.keys().choose(&mut self.rng).cloned()
    }
}
