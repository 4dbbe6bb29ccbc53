// src/clock.rs

// clock module definition and implementations

// dependencies
use parking_lot::Mutex;
use std::fmt::Debug;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current time in nanoseconds since the Unix epoch.
/// Limiters take a clock at construction, so tests can swap in a `ManualClock`.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> u64;
}

/// SystemClock implementation backed by real time.
///
/// The wall-clock offset is sampled once at construction and then advanced by
/// a monotonic `Instant`, so readings never go backwards while fixed windows
/// still line up with wall-clock boundaries. A system clock set before the
/// Unix epoch clamps the offset to zero.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    epoch_offset_nanos: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        let epoch_offset_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(duration_to_nanos)
            .unwrap_or(0);

        Self {
            origin: Instant::now(),
            epoch_offset_nanos,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.epoch_offset_nanos
            .saturating_add(duration_to_nanos(self.origin.elapsed()))
    }
}

/// A clock that only moves when told to.
///
/// The instant lives behind its own lock, independent of any limiter, so a
/// test thread may advance it while other threads call `allow`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_nanos: Mutex<u64>,
}

impl ManualClock {
    /// Create a clock reading `start` past the Unix epoch.
    pub fn new(start: Duration) -> Self {
        Self {
            now_nanos: Mutex::new(duration_to_nanos(start)),
        }
    }

    /// Jump to `t` past the epoch. Moving backwards is allowed.
    pub fn set(&self, t: Duration) {
        *self.now_nanos.lock() = duration_to_nanos(t);
    }

    /// Advance by `d`.
    pub fn add(&self, d: Duration) {
        let mut now = self.now_nanos.lock();
        *now = now.saturating_add(duration_to_nanos(d));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        *self.now_nanos.lock()
    }
}

/// Convert a duration to whole nanoseconds, saturating at `u64::MAX`.
pub fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
