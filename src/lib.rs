//! Image Cache - A byte-bounded in-memory cache for encoded images
//!
//! Fronts a durable backing store with LRU or random eviction.

pub mod api;
pub mod backing;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{EvictionPolicy, ImageCache};
pub use config::Config;
