//! Clock Module
//!
//! Time sources for TTL bookkeeping. Readings are milliseconds on a
//! monotonic scale; only differences between readings are meaningful.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A source of monotonic millisecond readings.
pub trait Clock {
    /// Returns the current reading in milliseconds.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Real time, measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        duration_ms(self.origin.elapsed())
    }
}

// == Manual Clock ==
/// Simulated time that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the
/// cache owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`, stopping at the largest reading.
    pub fn advance(&self, by: Duration) {
        let by = duration_ms(by);
        // The closure always returns Some, so the update cannot fail
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(by))
            });
    }

    /// Jumps to an absolute reading in milliseconds.
    pub fn set_ms(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
