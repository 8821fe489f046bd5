//! LRU Selector Module
//!
//! Implements Least Recently Used victim selection for cache eviction.

use std::collections::HashMap;

use crate::cache::{CacheEntry, VictimSelector};

// == LRU Selector ==
/// Selects the entry with the oldest access.
///
/// Accesses are ordered by the store's access counter rather than wall-clock
/// time, so two entries never compare equal and the victim is deterministic.
/// Selection is a linear scan over all entries.
#[derive(Debug, Default)]
pub struct LruSelector;

impl LruSelector {
    // == Constructor ==
    pub fn new() -> Self {
        Self
    }
}

impl VictimSelector for LruSelector {
    fn select_victim(&mut self, entries: &HashMap<String, CacheEntry>) -> Option<String> {
        entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(key, _)| key.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entries_with(seqs: &[(&str, u64)]) -> HashMap<String, CacheEntry> {
        seqs.iter()
            .map(|(key, seq)| (key.to_string(), CacheEntry::new(Bytes::from_static(b"x"), *seq)))
            .collect()
    }

    #[test]
    fn test_lru_picks_oldest_access() {
        let entries = entries_with(&[("key1", 3), ("key2", 1), ("key3", 2)]);
        let mut lru = LruSelector::new();

        assert_eq!(lru.select_victim(&entries), Some("key2".to_string()));
    }

    #[test]
    fn test_lru_follows_touches() {
        let mut entries = entries_with(&[("a", 1), ("b", 2), ("c", 3)]);
        let mut lru = LruSelector::new();

        // Touch 'a' so 'b' becomes oldest
        entries.get_mut("a").unwrap().touch(4);
        assert_eq!(lru.select_victim(&entries), Some("b".to_string()));

        entries.remove("b");
        assert_eq!(lru.select_victim(&entries), Some("c".to_string()));

        entries.remove("c");
        assert_eq!(lru.select_victim(&entries), Some("a".to_string()));
    }

    #[test]
    fn test_lru_single_entry() {
        let entries = entries_with(&[("only", 42)]);
        assert_eq!(LruSelector::new().select_victim(&entries), Some("only".to_string()));
    }

    #[test]
    fn test_lru_empty() {
        let entries = HashMap::new();
        assert_eq!(LruSelector::new().select_victim(&entries), None);
    }

    #[test]
    fn test_lru_does_not_mutate_entries() {
        let entries = entries_with(&[("a", 1), ("b", 2)]);
        let mut lru = LruSelector::new();

        assert_eq!(lru.select_victim(&entries), Some("a".to_string()));
        assert_eq!(lru.select_victim(&entries), Some("a".to_string()));
        assert_eq!(entries.len(), 2);
    }
}
