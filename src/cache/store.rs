//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy TTL
//! expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::clock::{duration_ms, Clock, SystemClock};
use crate::config::{CacheConfig, DEFAULT_CAPACITY};

// == Cache ==
/// Bounded key/value cache with LRU eviction and lazy TTL expiration.
///
/// Expired entries are only removed when an access discovers them (or on an
/// explicit [`Cache::purge_expired`]); until then they still count towards
/// [`Cache::len`].
#[derive(Debug)]
pub struct Cache<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker, always holding exactly the keys of `entries`
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL for entries stored without one
    default_ttl: Option<Duration>,
    clock: C,
}

impl<V> Cache<V, SystemClock> {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a cache from a [`CacheConfig`], using real time.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<V> Default for Cache<V, SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, C: Clock> Cache<V, C> {
    /// Creates a cache from a [`CacheConfig`] reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        info!(
            capacity = config.capacity,
            default_ttl_ms = config.default_ttl.map(duration_ms),
            "session cache created"
        );

        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: config.capacity,
            default_ttl: config.default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key`, optionally expiring after `ttl`.
    ///
    /// If the key already exists, the value is overwritten and its TTL clock
    /// restarts. If the key is new and the cache is full, the least recently
    /// used entry is evicted first. Either way `key` becomes the most recently
    /// used entry. `ttl` of None falls back to the configured default TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        debug_assert!(!key.is_empty(), "cache keys must be non-empty");

        if self.capacity == 0 {
            trace!(key = %key, "zero-capacity cache, value dropped");
            return;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl.or(self.default_ttl));
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves the value for `key`, promoting it to most recently used.
    ///
    /// Returns None for both absent and expired keys; an expired entry is
    /// removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if !self.purge_if_expired(key) {
            self.stats.record_miss();
            trace!(key, "cache miss");
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        trace!(key, "cache hit");
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Returns true if `key` holds a live value.
    ///
    /// Goes through [`Cache::get`], so it promotes the key and purges it if
    /// expired exactly like a read would.
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Peek ==
    /// Reads a live value without touching recency or statistics.
    ///
    /// Expired entries read as None but are left in place.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| &entry.value)
    }

    /// Returns the TTL left on a live entry, None if absent, expired or
    /// stored without a TTL.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.ttl_remaining(now))
    }

    // == Delete ==
    /// Removes an entry by key, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(entry.value)
    }

    // == Clear ==
    /// Removes every entry. Capacity and statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Only runs when called; the cache never sweeps on its own.
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        let count = expired_keys.len();
        if count > 0 {
            debug!(count, "purged expired entries");
        }
        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lru.iter()
    }

    // == Length ==
    /// Returns the number of resident entries, including expired entries no
    /// access has discovered yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if `key` is resident and live, removing it if expired.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "expired entry removed on access");
        }
        !expired
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.lru.evict_oldest() {
            self.entries.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = %evicted, capacity = self.capacity, "evicted least recently used entry");
        }
    }

    /// Panics unless the recency order tracks exactly the stored keys.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.lru.len(), self.entries.len(), "tracker/entry count mismatch");
        for key in self.entries.keys() {
            assert!(self.lru.contains(key), "untracked key {key:?}");
        }
        assert!(self.entries.len() <= self.capacity);
    }
}
