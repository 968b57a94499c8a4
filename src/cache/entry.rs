//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use crate::clock::duration_ms;

// == Cache Entry ==
/// A stored value together with the bookkeeping needed to expire it.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Clock reading (ms) at the most recent `set` of this key
    pub stored_at: u64,
    /// Time-to-live, None = no expiration
    pub ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stored at clock reading `now`.
    pub fn new(value: V, now: u64, ttl: Option<Duration>) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at clock reading `now`.
    ///
    /// Boundary condition: an entry is still live when exactly `ttl` has
    /// elapsed, and expired once strictly more than `ttl` has elapsed.
    pub fn is_expired(&self, now: u64) -> bool {
        match self.ttl {
            Some(ttl) => self.age_ms(now) > duration_ms(ttl),
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the TTL left at clock reading `now`, or None if the entry
    /// never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the TTL has fully elapsed
    /// - `Some(remaining)` if the entry has a TTL that hasn't elapsed
    /// - `None` if the entry has no TTL
    pub fn ttl_remaining(&self, now: u64) -> Option<Duration> {
        self.ttl.map(|ttl| {
            Duration::from_millis(duration_ms(ttl).saturating_sub(self.age_ms(now)))
        })
    }

    fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.stored_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value", 10, None);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.stored_at, 10);
        assert!(entry.ttl.is_none());
        assert!(!entry.is_expired(u64::MAX));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(7, 1_000, Some(Duration::from_millis(1_000)));

        assert!(!entry.is_expired(1_000));
        assert!(!entry.is_expired(1_999));
        assert!(entry.is_expired(2_001));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new((), 0, Some(Duration::from_millis(500)));

        // Exactly ttl elapsed is still live
        assert!(!entry.is_expired(500));
        assert!(entry.is_expired(501));
    }

    #[test]
    fn test_clock_reading_before_store_is_not_expired() {
        let entry = CacheEntry::new((), 5_000, Some(Duration::from_millis(1)));
        assert!(!entry.is_expired(4_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("v", 100, Some(Duration::from_secs(10)));

        assert_eq!(entry.ttl_remaining(100), Some(Duration::from_secs(10)));
        assert_eq!(entry.ttl_remaining(2_100), Some(Duration::from_secs(8)));
        assert_eq!(entry.ttl_remaining(20_000), Some(Duration::ZERO));
    }

    #[test]
    fn test_huge_ttl_does_not_wrap() {
        // Larger than u64::MAX milliseconds
        let ttl = Duration::from_secs(18_446_744_073_709_552);
        let entry = CacheEntry::new(1, 0, Some(ttl));

        assert!(!entry.is_expired(385));
        assert!(!entry.is_expired(u64::MAX));
        assert_eq!(
            entry.ttl_remaining(385),
            Some(Duration::from_millis(u64::MAX - 385))
        );
    }

    #[test]
    fn test_ttl_remaining_no_expiration() {
        let entry = CacheEntry::new("v", 0, None);
        assert!(entry.ttl_remaining(1_000).is_none());
    }
}
