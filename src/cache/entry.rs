//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their access metadata.

use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

// == Cache Entry ==
/// A single cached payload with its size and last access.
///
/// The payload is never mutated in place; replacing a key's payload means
/// removing the old entry and inserting a new one.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored (encoded image) payload
    pub payload: Bytes,
    /// Exact byte length of `payload`, used for all capacity accounting
    pub size_bytes: usize,
    /// Last access as Unix milliseconds
    pub last_access_ms: u64,
    /// Store-wide access counter at the last access, strictly increasing
    pub access_seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry, stamped as accessed at `seq`.
    pub fn new(payload: Bytes, seq: u64) -> Self {
        Self {
            size_bytes: payload_size(&payload),
            payload,
            last_access_ms: current_timestamp_ms(),
            access_seq: seq,
        }
    }

    // == Touch ==
    /// Records an access at `seq`.
    pub fn touch(&mut self, seq: u64) {
        self.last_access_ms = current_timestamp_ms();
        self.access_seq = seq;
    }
}

// == Utility Functions ==
/// Size measure for payloads: the exact number of stored bytes.
pub fn payload_size(payload: &[u8]) -> usize {
    payload.len()
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
