//! Backing Store Module
//!
//! The durable key-value service the cache sits in front of, plus the
//! read-through and write-through flows that connect the two.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::ImageCache;
use crate::error::Result;

// == Backing Store ==
/// Authoritative storage for image payloads.
pub trait BackingStore: Send + Sync + fmt::Debug {
    /// Fetches a payload, `Ok(None)` when the key is unknown.
    fn get_by_key(&self, key: &str) -> Result<Option<Bytes>>;

    /// Stores a payload, replacing any previous one.
    fn put_by_key(&self, key: &str, payload: Bytes) -> Result<()>;
}

// == Memory Backing Store ==
/// In-process backing store.
#[derive(Debug, Default)]
pub struct MemoryBackingStore {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryBackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

impl BackingStore for MemoryBackingStore {
    fn get_by_key(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.objects.lock().get(key).cloned())
    }

    fn put_by_key(&self, key: &str, payload: Bytes) -> Result<()> {
        self.objects.lock().insert(key.to_string(), payload);
        Ok(())
    }
}

// == Read Through ==
/// Serves `key` from the cache, falling back to the backing store on a miss.
///
/// A payload fetched from the store is offered to the cache; if the cache
/// refuses it the payload is still returned to the caller.
pub fn read_through(
    cache: &ImageCache,
    store: &dyn BackingStore,
    key: &str,
) -> Result<Option<Bytes>> {
    if let Some(payload) = cache.get(key) {
        debug!(key, "Cache hit");
        return Ok(Some(payload));
    }

    let Some(payload) = store.get_by_key(key)? else {
        debug!(key, "Key unknown to backing store");
        return Ok(None);
    };

    if !cache.put(key, payload.clone()) {
        warn!(key, size = payload.len(), "Fetched payload not admitted to cache");
    }
    Ok(Some(payload))
}

// == Write Through ==
/// Writes `payload` to the backing store and drops any cached copy.
///
/// The next read refills the cache from the store.
pub fn write_through(
    cache: &ImageCache,
    store: &dyn BackingStore,
    key: &str,
    payload: Bytes,
) -> Result<()> {
    store.put_by_key(key, payload)?;
    cache.invalidate(key);
    Ok(())
}
