//! Shared Cache Handle
//!
//! Thread-safe, cloneable handle over a single [`CacheStore`].

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, EvictionPolicy};
use crate::error::Result;

// == Image Cache ==
/// Cloneable handle to one process-wide cache instance.
///
/// Every operation runs inside a single critical section, so the
/// check-capacity, evict, insert sequence of `put` is atomic and concurrent
/// calls are linearizable. No operation performs I/O while holding the lock.
#[derive(Debug, Clone)]
pub struct ImageCache {
    inner: Arc<Mutex<CacheStore>>,
}

impl ImageCache {
    /// Wraps an existing store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Creates a cache holding at most `capacity_mb` megabytes.
    pub fn with_capacity_mb(capacity_mb: usize, policy: EvictionPolicy) -> Self {
        Self::new(CacheStore::new(capacity_mb, policy))
    }

    /// Stores a payload. Returns false when the payload is refused.
    ///
    /// Refusals are logged by the store.
    pub fn put(&self, key: impl Into<String>, payload: impl Into<Bytes>) -> bool {
        self.inner.lock().put(key.into(), payload.into()).is_ok()
    }

    /// Same as [`put`](Self::put) but reports why a payload was refused.
    pub fn try_put(&self, key: impl Into<String>, payload: impl Into<Bytes>) -> Result<()> {
        self.inner.lock().put(key.into(), payload.into())
    }

    /// Looks up a payload, refreshing its recency on a hit.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.lock().get(key)
    }

    /// Drops a key. Always true; an absent key is not an error.
    pub fn invalidate(&self, key: &str) -> bool {
        self.inner.lock().invalidate(key)
    }

    /// Drops everything.
    pub fn clear(&self) -> bool {
        self.inner.lock().clear();
        true
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.inner.lock().total_bytes()
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.inner.lock().policy()
    }

    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }
}
