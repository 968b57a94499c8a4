//! Shared Cache Module
//!
//! Thread-safe handle over a [`Cache`] for callers that share one instance.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{Cache, CacheStats};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

// == Shared Cache ==
/// Cloneable, thread-safe handle to a single [`Cache`].
///
/// Every operation runs under one mutex, so the entry map and the recency
/// order are never observed out of step. Reads hand back clones because a
/// reference cannot outlive the lock.
#[derive(Debug)]
pub struct SharedCache<V, C = SystemClock> {
    inner: Arc<Mutex<Cache<V, C>>>,
}

impl<V, C> Clone for SharedCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedCache<V, SystemClock> {
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(Cache::new(capacity))
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self::from_cache(Cache::with_config(config))
    }
}

impl<V> Default for SharedCache<V, SystemClock> {
    fn default() -> Self {
        Self::from_cache(Cache::default())
    }
}

impl<V, C: Clock> SharedCache<V, C> {
    /// Wraps an existing cache.
    pub fn from_cache(cache: Cache<V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.lock().set(key, value, ttl);
    }

    /// Returns a clone of the live value for `key`, promoting it.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    pub fn delete(&self, key: &str) -> Option<V> {
        self.inner.lock().delete(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// The lock is released while `compute` runs, so the closure may read or
    /// write this same cache. Two callers missing on the same key can both
    /// compute; the first to store wins and the other gets the stored value.
    pub fn get_or_insert_with<F>(&self, key: &str, ttl: Option<Duration>, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();

        let mut cache = self.inner.lock();
        if cache.peek(key).is_some() {
            if let Some(existing) = cache.get(key) {
                return existing.clone();
            }
        }
        cache.set(key, value.clone(), ttl);
        value
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::thread;

    #[test]
    fn test_shared_clones_see_same_cache() {
        let cache = SharedCache::new(10);
        let other = cache.clone();

        cache.set("a", 1, None);

        assert_eq!(other.get("a"), Some(1));
        assert_eq!(other.len(), 1);
        assert_eq!(other.delete("a"), Some(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_get_or_insert_with() {
        let cache = SharedCache::new(10);
        let mut calls = 0;

        let first = cache.get_or_insert_with("recipe:1", None, || {
            calls += 1;
            "pancakes".to_string()
        });
        let second = cache.get_or_insert_with("recipe:1", None, || {
            calls += 1;
            "waffles".to_string()
        });

        assert_eq!(first, "pancakes");
        assert_eq!(second, "pancakes");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_shared_get_or_insert_with_recomputes_after_expiry() {
        let clock = ManualClock::new();
        let cache = SharedCache::from_cache(Cache::with_clock(
            CacheConfig::with_capacity(4),
            clock.clone(),
        ));
        let ttl = Some(Duration::from_millis(100));

        assert_eq!(cache.get_or_insert_with("k", ttl, || 1), 1);
        clock.advance(Duration::from_millis(150));
        assert_eq!(cache.get_or_insert_with("k", ttl, || 2), 2);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_shared_get_or_insert_with_reads_same_cache() {
        let cache = SharedCache::new(10);
        let inner = cache.clone();
        cache.set("base", 4, None);

        let derived =
            cache.get_or_insert_with("derived", None, || inner.get("base").unwrap_or(0) * 10);

        assert_eq!(derived, 40);
        assert_eq!(cache.get("derived"), Some(40));
    }

    #[test]
    fn test_shared_get_or_insert_with_keeps_first_stored_value() {
        let cache = SharedCache::new(10);
        let inner = cache.clone();

        // Another writer stores the key while the value is being computed
        let value = cache.get_or_insert_with("k", None, || {
            inner.set("k", 1, None);
            2
        });

        assert_eq!(value, 1);
        assert_eq!(cache.get("k"), Some(1));
    }

    #[test]
    fn test_shared_threads_respect_capacity() {
        let cache = SharedCache::new(8);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        cache.set(format!("t{t}-k{i}"), i, None);
                        assert!(cache.len() <= 8);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.stats().evictions, 4 * 50 - 8);
        cache.inner.lock().assert_consistent();
    }
}
