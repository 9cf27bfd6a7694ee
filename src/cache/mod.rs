//! Cache Module
//!
//! Provides the in-memory cache engine with LRU eviction, a weight ceiling
//! and lazy TTL expiration.

mod engine;
mod entry;
mod lru;
mod size;
mod stats;
mod store;


// Re-export public types
pub use engine::CacheEngine;
pub use entry::{unit_weight, CacheEntry, Weigher};
pub use lru::{RecencyHandle, RecencyList};
pub use size::SizeAccountant;
pub use stats::CacheStats;
pub use store::EntryStore;
