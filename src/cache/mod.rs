//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub(crate) use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::Cache;
