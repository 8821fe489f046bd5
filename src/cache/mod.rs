//! Cache Module
//!
//! Provides a byte-bounded in-memory cache with LRU or random eviction.

mod entry;
mod lru;
mod policy;
mod random;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruSelector;
pub use policy::{EvictionPolicy, VictimSelector};
pub use random::RandomSelector;
pub use shared::ImageCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Bytes per configured megabyte of capacity
pub const BYTES_PER_MB: usize = 1_048_576;
