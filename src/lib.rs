//! Session Cache - A bounded in-memory cache for a single session
//!
//! Provides key/value memoization with lazy TTL expiration and LRU eviction.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, SharedCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
