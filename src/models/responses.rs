//! Response DTOs for the image cache API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, EvictionPolicy};

/// Response body for uploads and direct cache puts
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    /// The key that was stored
    pub key: String,
    /// Payload size in bytes
    pub size_bytes: usize,
}

impl PutResponse {
    pub fn new(key: impl Into<String>, size_bytes: usize) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' stored successfully", key),
            key,
            size_bytes,
        }
    }
}

/// Response body for DELETE /cache/:key
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub key: String,
}

impl InvalidateResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' invalidated", key),
            key,
        }
    }
}

/// Response body for DELETE /cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub policy: EvictionPolicy,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub rejected: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    pub total_bytes: usize,
    pub capacity_bytes: usize,
    /// Hit rate as a ratio (0.0 to 1.0)
    pub hit_rate: f64,
    /// Fraction of capacity in use (0.0 to 1.0)
    pub utilization: f64,
    /// Unix ms of the least recently accessed entry, null when empty
    pub oldest_access_ms: Option<u64>,
    /// Unix ms of the most recently accessed entry, null when empty
    pub newest_access_ms: Option<u64>,
}

impl StatsResponse {
    pub fn new(policy: EvictionPolicy, stats: &CacheStats) -> Self {
        Self {
            policy,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            rejected: stats.rejected,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            total_bytes: stats.total_bytes,
            capacity_bytes: stats.capacity_bytes,
            hit_rate: stats.hit_rate(),
            utilization: stats.utilization(),
            oldest_access_ms: stats.oldest_access_ms,
            newest_access_ms: stats.newest_access_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
