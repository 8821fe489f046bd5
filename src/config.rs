//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use tracing::warn;

use crate::cache::{EvictionPolicy, BYTES_PER_MB};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache capacity in megabytes
    pub capacity_mb: usize,
    /// Eviction policy applied under capacity pressure
    pub eviction_policy: EvictionPolicy,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY_MB` - Cache capacity in megabytes (default: 10)
    /// - `EVICTION_POLICY` - `LRU` or `RANDOM` (default: LRU)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let eviction_policy = match env::var("EVICTION_POLICY") {
            Ok(raw) => raw.parse::<EvictionPolicy>().unwrap_or_else(|err| {
                warn!("{}, falling back to {}", err, defaults.eviction_policy);
                defaults.eviction_policy
            }),
            Err(_) => defaults.eviction_policy,
        };

        Self {
            capacity_mb: env::var("CACHE_CAPACITY_MB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity_mb),
            eviction_policy,
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Capacity converted to bytes.
    pub fn capacity_bytes(&self) -> usize {
        self.capacity_mb.saturating_mul(BYTES_PER_MB)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_mb: 10,
            eviction_policy: EvictionPolicy::Lru,
            server_port: 3000,
        }
    }
}
