//! Clock abstraction
//!
//! All code that needs current time goes through [`Clock`], so tests can
//! substitute a fixed clock. [`MonotonicClock`] additionally guarantees the
//! non-decreasing timestamps the event-sink protocol requires: wall time can
//! step backwards (NTP), emitted event times must not.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock milliseconds
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time in milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// Production clock using the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl WallClock {
    /// Create a new wall clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock wrapper that never goes backwards within this process
///
/// Successive `now_ms` calls return non-decreasing values even if the
/// underlying clock regresses. Shared freely across threads.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    inner: Arc<dyn Clock>,
    last_ms: Arc<AtomicU64>,
}

impl MonotonicClock {
    /// Wrap a clock with the non-decreasing guarantee
    pub fn new(inner: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            last_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Production monotonic clock over the system wall clock
    pub fn wall() -> Self {
        Self::new(Arc::new(WallClock::new()))
    }

    /// Current time in milliseconds, clamped to never decrease
    pub fn now_ms(&self) -> u64 {
        let wall = self.inner.now_ms();
        let prev = self.last_ms.fetch_max(wall, Ordering::SeqCst);
        prev.max(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct ScriptedClock {
        times: Mutex<Vec<u64>>,
    }

    impl Clock for ScriptedClock {
        fn now_ms(&self) -> u64 {
            let mut times = self.times.lock().unwrap();
            if times.len() > 1 {
                times.remove(0)
            } else {
                times[0]
            }
        }
    }

    #[test]
    fn test_wall_clock_reasonable() {
        let clock = WallClock::new();
        let now = clock.now_ms();
        assert!(now > 1577836800000); // after Jan 1, 2020

        let now2 = clock.now_ms();
        assert!(now2 >= now);
    }

    #[test]
    fn test_monotonic_clock_clamps_regressions() {
        let scripted = ScriptedClock {
            times: Mutex::new(vec![100, 200, 150, 300]),
        };
        let clock = MonotonicClock::new(Arc::new(scripted));

        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.now_ms(), 200);
        // Wall clock stepped back to 150; emitted time must hold at 200.
        assert_eq!(clock.now_ms(), 200);
        assert_eq!(clock.now_ms(), 300);
    }

    #[test]
    fn test_monotonic_clock_non_decreasing_sequence() {
        let clock = MonotonicClock::wall();
        let mut prev = 0;
        for _ in 0..1000 {
            let t = clock.now_ms();
            assert!(t >= prev);
            prev = t;
        }
    }
}
