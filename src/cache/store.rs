//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with byte-level capacity
//! accounting and a pluggable eviction policy.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, error};

use crate::cache::entry::payload_size;
use crate::cache::{CacheEntry, CacheStats, EvictionPolicy, VictimSelector, BYTES_PER_MB};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Byte-bounded cache storage.
///
/// Not synchronized; see [`crate::cache::ImageCache`] for the shared handle.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-payload storage
    entries: HashMap<String, CacheEntry>,
    /// Running sum of `size_bytes` over all entries
    total_bytes: usize,
    /// Byte ceiling
    capacity_bytes: usize,
    /// Configured policy
    policy: EvictionPolicy,
    /// Victim selection strategy for `policy`
    selector: Box<dyn VictimSelector>,
    /// Access counter used to order entries by recency
    access_seq: u64,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructors ==
    /// Creates a store holding at most `capacity_mb` megabytes.
    pub fn new(capacity_mb: usize, policy: EvictionPolicy) -> Self {
        Self::with_capacity_bytes(capacity_mb.saturating_mul(BYTES_PER_MB), policy)
    }

    /// Creates a store with an exact byte ceiling.
    pub fn with_capacity_bytes(capacity_bytes: usize, policy: EvictionPolicy) -> Self {
        Self::with_selector(capacity_bytes, policy, policy.selector())
    }

    /// Creates a store with an explicit victim selector (e.g. a seeded one).
    pub fn with_selector(
        capacity_bytes: usize,
        policy: EvictionPolicy,
        selector: Box<dyn VictimSelector>,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            total_bytes: 0,
            capacity_bytes,
            policy,
            selector,
            access_seq: 0,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Stores `payload` under `key`, evicting other entries as needed.
    ///
    /// Empty payloads and payloads larger than the whole capacity are
    /// rejected without touching the stored entries. An existing entry for
    /// `key` is released before eviction runs, so its size is never counted
    /// twice.
    pub fn put(&mut self, key: String, payload: Bytes) -> Result<()> {
        if payload.is_empty() {
            self.stats.record_rejection();
            debug!(key = %key, "Rejected put: empty payload");
            return Err(CacheError::Rejected("Payload is empty".to_string()));
        }

        let size = payload_size(&payload);
        if size > self.capacity_bytes {
            self.stats.record_rejection();
            debug!(key = %key, size, capacity = self.capacity_bytes, "Rejected put: payload exceeds capacity");
            return Err(CacheError::Rejected(format!(
                "Payload of {} bytes exceeds cache capacity of {} bytes",
                size, self.capacity_bytes
            )));
        }

        if let Some(old) = self.entries.remove(&key) {
            self.release(old.size_bytes);
        }

        self.make_room(size);

        let seq = self.next_seq();
        self.entries.insert(key, CacheEntry::new(payload, seq));
        self.total_bytes += size;

        Ok(())
    }

    // == Get ==
    /// Returns the payload for `key` and marks it as recently used.
    ///
    /// A miss leaves entries and byte accounting untouched.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        let seq = self.access_seq + 1;
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.access_seq = seq;
                entry.touch(seq);
                self.stats.record_hit();
                Some(entry.payload.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the payload for `key` without touching recency or stats.
    pub fn peek(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Invalidate ==
    /// Drops `key` if present. Absence is not an error; always returns true.
    pub fn invalidate(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.remove(key) {
            self.release(entry.size_bytes);
            self.stats.record_invalidation();
            debug!(key, size = entry.size_bytes, "Invalidated entry");
        }
        true
    }

    // == Clear ==
    /// Removes every entry and resets the byte count.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
    }

    // == Eviction ==
    /// Evicts entries until `incoming` more bytes fit or the cache is empty.
    fn make_room(&mut self, incoming: usize) {
        while self.total_bytes + incoming > self.capacity_bytes && !self.entries.is_empty() {
            let Some(victim) = self.selector.select_victim(&self.entries) else {
                break;
            };

            match self.entries.remove(&victim) {
                Some(evicted) => {
                    self.release(evicted.size_bytes);
                    self.stats.record_eviction();
                    debug!(
                        key = %victim,
                        size = evicted.size_bytes,
                        policy = %self.policy,
                        "Evicted entry"
                    );
                }
                None => {
                    error!(key = %victim, "Eviction selected a key that is not cached");
                    break;
                }
            }
        }
    }

    /// Subtracts `size` from the running byte count.
    fn release(&mut self, size: usize) {
        debug_assert!(
            size <= self.total_bytes,
            "byte accounting underflow: releasing {} of {}",
            size,
            self.total_bytes
        );
        match self.total_bytes.checked_sub(size) {
            Some(remaining) => self.total_bytes = remaining,
            None => {
                error!(size, total = self.total_bytes, "Byte accounting underflow");
                self.total_bytes = 0;
            }
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.access_seq += 1;
        self.access_seq
    }

    // == Invariants ==
    /// Verifies byte accounting and the capacity bound.
    pub fn check_invariants(&self) -> Result<()> {
        let actual: usize = self.entries.values().map(|e| e.size_bytes).sum();
        if actual != self.total_bytes {
            return Err(CacheError::Internal(format!(
                "Byte accounting mismatch: recorded {} but entries hold {}",
                self.total_bytes, actual
            )));
        }
        if self.total_bytes > self.capacity_bytes {
            return Err(CacheError::Internal(format!(
                "Stored {} bytes exceeds capacity of {} bytes",
                self.total_bytes, self.capacity_bytes
            )));
        }
        if let Some((key, _)) = self
            .entries
            .iter()
            .find(|(_, e)| e.size_bytes != payload_size(&e.payload))
        {
            return Err(CacheError::Internal(format!("Stale size for key {}", key)));
        }
        Ok(())
    }

    // == Accessors ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.total_bytes = self.total_bytes;
        stats.capacity_bytes = self.capacity_bytes;
        stats.oldest_access_ms = self.entries.values().map(|e| e.last_access_ms).min();
        stats.newest_access_ms = self.entries.values().map(|e| e.last_access_ms).max();
        stats
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RandomSelector;

    fn payload(size: usize) -> Bytes {
        Bytes::from(vec![0xAB; size])
    }

    fn lru_store(capacity: usize) -> CacheStore {
        CacheStore::with_capacity_bytes(capacity, EvictionPolicy::Lru)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(2, EvictionPolicy::Lru);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity_bytes(), 2 * 1_048_576);
        assert_eq!(store.policy(), EvictionPolicy::Lru);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = lru_store(100);

        store.put("key1".to_string(), Bytes::from_static(b"image")).unwrap();

        assert_eq!(store.get("key1"), Some(Bytes::from_static(b"image")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 5);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = lru_store(100);
        store.put("key1".to_string(), payload(10)).unwrap();

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 10);
    }

    #[test]
    fn test_store_rejects_empty_payload() {
        let mut store = lru_store(100);

        let result = store.put("key1".to_string(), Bytes::new());
        assert!(matches!(result, Err(CacheError::Rejected(_))));
        assert!(store.is_empty());
        assert_eq!(store.stats().rejected, 1);
    }

    #[test]
    fn test_store_rejects_oversized_payload() {
        let mut store = lru_store(100);
        store.put("small".to_string(), payload(60)).unwrap();

        let result = store.put("huge".to_string(), payload(101));
        assert!(matches!(result, Err(CacheError::Rejected(_))));

        // Existing contents are untouched
        assert!(store.contains("small"));
        assert!(!store.contains("huge"));
        assert_eq!(store.total_bytes(), 60);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_rejected_overwrite_keeps_existing_entry() {
        let mut store = lru_store(100);
        let original = payload(40);
        store.put("k".to_string(), original.clone()).unwrap();

        let result = store.put("k".to_string(), payload(101));
        assert!(matches!(result, Err(CacheError::Rejected(_))));

        let result = store.put("k".to_string(), Bytes::new());
        assert!(matches!(result, Err(CacheError::Rejected(_))));

        assert_eq!(store.peek("k"), Some(original));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 40);
        assert_eq!(store.stats().rejected, 2);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_accepts_payload_equal_to_capacity() {
        let mut store = lru_store(100);
        store.put("a".to_string(), payload(30)).unwrap();

        store.put("full".to_string(), payload(100)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 100);
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_store_overwrite_does_not_double_count() {
        let mut store = lru_store(100);

        store.put("key1".to_string(), payload(40)).unwrap();
        store.put("key1".to_string(), payload(70)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 70);
        assert_eq!(store.get("key1").map(|p| p.len()), Some(70));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_overwrite_evicts_others_when_needed() {
        let mut store = lru_store(100);

        store.put("a".to_string(), payload(60)).unwrap();
        store.put("b".to_string(), payload(30)).unwrap();
        store.put("a".to_string(), payload(80)).unwrap();

        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.total_bytes(), 80);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = lru_store(30);

        store.put("key1".to_string(), payload(10)).unwrap();
        store.put("key2".to_string(), payload(10)).unwrap();
        store.put("key3".to_string(), payload(10)).unwrap();

        // Cache is full, adding key4 should evict key1 (oldest)
        store.put("key4".to_string(), payload(10)).unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = lru_store(100);

        store.put("A".to_string(), payload(50)).unwrap();
        store.put("B".to_string(), payload(50)).unwrap();

        // Access A so B becomes least recently used
        assert!(store.get("A").is_some());

        store.put("C".to_string(), payload(50)).unwrap();

        assert!(store.contains("A"));
        assert!(!store.contains("B"));
        assert!(store.contains("C"));
    }

    #[test]
    fn test_store_evicts_multiple_for_large_payload() {
        let mut store = lru_store(100);

        for i in 0..5 {
            store.put(format!("key{}", i), payload(20)).unwrap();
        }
        store.put("big".to_string(), payload(70)).unwrap();

        // 100 - 70 = 30, so only one 20-byte entry survives: the newest one
        assert_eq!(store.len(), 2);
        assert!(store.contains("key4"));
        assert_eq!(store.total_bytes(), 90);
        assert_eq!(store.stats().evictions, 4);
    }

    #[test]
    fn test_store_random_eviction_keeps_bounds() {
        let mut store = CacheStore::with_selector(
            100,
            EvictionPolicy::Random,
            Box::new(RandomSelector::with_seed(3)),
        );

        for i in 0..50 {
            store.put(format!("key{}", i), payload(7 + i % 13)).unwrap();
            assert!(store.total_bytes() <= 100);
            store.check_invariants().unwrap();
        }
        assert!(store.contains("key49"));
        assert!(store.stats().evictions > 0);
    }

    #[test]
    fn test_store_invalidate() {
        let mut store = lru_store(100);

        store.put("key1".to_string(), payload(25)).unwrap();
        assert!(store.invalidate("key1"));

        assert!(store.is_empty());
        assert_eq!(store.total_bytes(), 0);
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_invalidate_nonexistent() {
        let mut store = lru_store(100);
        store.put("key1".to_string(), payload(25)).unwrap();

        assert!(store.invalidate("nonexistent"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_bytes(), 25);
        assert_eq!(store.stats().invalidations, 0);
    }

    #[test]
    fn test_store_clear() {
        let mut store = lru_store(100);
        store.put("a".to_string(), payload(10)).unwrap();
        store.put("b".to_string(), payload(20)).unwrap();

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.total_bytes(), 0);
        store.check_invariants().unwrap();
    }

    #[test]
    fn test_store_stats() {
        let mut store = lru_store(100);

        store.put("key1".to_string(), payload(40)).unwrap();
        store.get("key1").unwrap(); // hit
        let _ = store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.total_bytes, 40);
        assert_eq!(stats.capacity_bytes, 100);
    }

    #[test]
    fn test_store_stats_access_window() {
        let mut store = lru_store(100);

        let stats = store.stats();
        assert_eq!(stats.oldest_access_ms, None);
        assert_eq!(stats.newest_access_ms, None);

        store.put("a".to_string(), payload(10)).unwrap();
        store.put("b".to_string(), payload(10)).unwrap();
        store.get("a").unwrap();

        let stats = store.stats();
        let oldest = stats.oldest_access_ms.unwrap();
        let newest = stats.newest_access_ms.unwrap();
        assert!(oldest <= newest);
        assert!(oldest > 1_577_836_800_000);

        store.clear();
        assert_eq!(store.stats().oldest_access_ms, None);
    }

    #[test]
    fn test_store_zero_capacity_rejects_everything() {
        let mut store = lru_store(0);

        assert!(store.put("a".to_string(), payload(1)).is_err());
        assert!(store.is_empty());
    }
}
