//! LRU Cache Server - A small HTTP key/value cache
//!
//! Bounded by entry count and total weight, with least-recently-used
//! eviction and lazy TTL expiration.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use cache::CacheEngine;
pub use config::Config;
