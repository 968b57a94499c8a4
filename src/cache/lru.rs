//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with a fresh, strictly increasing tick, so the
/// order is total and needs no tie-breaking:
/// - Smallest tick = Least recently used
/// - Largest tick = Most recently used
///
/// Touch, remove and evict are O(log n).
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Current tick of each tracked key
    ticks: HashMap<String, u64>,
    /// Keys ordered by tick
    order: BTreeMap<u64, String>,
    /// Tick handed to the next touch
    next_tick: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if it is new.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(current) = self.ticks.get_mut(key) {
            let previous = std::mem::replace(current, tick);
            let owned = self
                .order
                .remove(&previous)
                .unwrap_or_else(|| key.to_string());
            self.order.insert(tick, owned);
            return;
        }

        self.ticks.insert(key.to_string(), tick);
        self.order.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(String::as_str)
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.ticks.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.ticks.contains_key(key)
    }
}
