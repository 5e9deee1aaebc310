//! Injectable clock so cache freshness and debounce timing are
//! deterministic under test.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    /// Monotonic instant for freshness windows and debounce deadlines.
    fn now(&self) -> Instant;

    /// Wall-clock timestamp for `lastUpdated` stamping.
    fn timestamp(&self) -> jiff::Timestamp;
}

/// Production clock backed by the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn timestamp(&self) -> jiff::Timestamp {
        jiff::Timestamp::now()
    }
}

/// Manually advanced clock for deterministic tests. Starts at the epoch and
/// only moves when `advance` is called.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock()
    }

    fn timestamp(&self) -> jiff::Timestamp {
        jiff::Timestamp::UNIX_EPOCH + *self.offset.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let before = clock.now();
        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now().duration_since(before), Duration::from_secs(10));
    }

    #[test]
    fn test_manual_clock_timestamp_tracks_offset() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(60));
        assert_eq!(clock.timestamp().as_second(), 60);
    }
}
