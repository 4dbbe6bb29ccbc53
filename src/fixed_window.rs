// src/fixed_window.rs

// fixed window: count requests inside aligned, non-overlapping time slices

// dependencies
use crate::cleanup::Sweeper;
use crate::clock::{Clock, duration_to_nanos};
use crate::config::{FixedWindowConfig, clock_or_system};
use crate::errors::Result;
use crate::limiter::{Decision, Limiter};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Per-key counter for the window starting at `window_start`.
#[derive(Debug, Clone)]
struct WindowState {
    window_start: u64,
    count: u32,
    last_seen: u64,
}

#[derive(Debug)]
struct Windows {
    states: HashMap<String, WindowState>,
    sweeper: Option<Sweeper>,
}

/// Fixed window limiter.
///
/// Windows are aligned to multiples of the window size since the Unix epoch,
/// so every key shares the same boundaries.
#[derive(Debug)]
pub struct FixedWindow {
    limit: u32,
    window_nanos: u64,
    clock: Arc<dyn Clock>,
    windows: Mutex<Windows>,
}

impl FixedWindow {
    /// Create a limiter allowing `limit` requests per `window`, using the
    /// system clock and no eviction.
    pub fn new(limit: u32, window: Duration) -> Result<Self> {
        Self::with_config(FixedWindowConfig::new(limit, window))
    }

    pub fn with_config(config: FixedWindowConfig) -> Result<Self> {
        config.validate()?;

        let clock = clock_or_system(config.clock);
        let sweeper = Sweeper::new(
            config.eviction.state_ttl,
            config.eviction.cleanup_interval,
            clock.now(),
        );

        debug!(
            limit = config.limit,
            window = ?config.window,
            state_ttl = ?config.eviction.state_ttl,
            "Created fixed window limiter"
        );

        Ok(Self {
            limit: config.limit,
            window_nanos: duration_to_nanos(config.window),
            clock,
            windows: Mutex::new(Windows {
                states: HashMap::new(),
                sweeper,
            }),
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        Duration::from_nanos(self.window_nanos)
    }

    /// Number of keys currently holding state.
    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().states.len()
    }

    pub fn check_request(&self, key: &str) -> Decision {
        let mut guard = self.windows.lock();
        let windows = &mut *guard;
        let now = self.clock.now();
        let window_start = now - now % self.window_nanos;

        if let Some(sweeper) = windows.sweeper.as_mut() {
            sweeper.maybe_sweep(now, &mut windows.states, |state| state.last_seen);
        }

        let state = windows
            .states
            .entry(key.to_owned())
            .and_modify(|state| {
                // a backward jump opens a fresh window just like a forward one
                if window_start != state.window_start {
                    if window_start < state.window_start {
                        debug!(key, "Clock moved backwards, resetting window");
                    }
                    state.window_start = window_start;
                    state.count = 0;
                }
            })
            .or_insert_with(|| {
                debug!(key, limit = self.limit, "Creating fixed window state");
                WindowState {
                    window_start,
                    count: 0,
                    last_seen: now,
                }
            });
        state.last_seen = now;

        let decision = if state.count < self.limit {
            state.count += 1;
            Decision::allow()
        } else {
            let window_end = state.window_start.saturating_add(self.window_nanos);
            Decision::deny(Duration::from_nanos(window_end.saturating_sub(now)))
        };

        trace!(
            key,
            allowed = decision.allowed,
            retry_after = ?decision.retry_after,
            count = state.count,
            "Fixed window decision"
        );
        decision
    }
}

impl Limiter for FixedWindow {
    fn allow(&self, key: &str) -> Decision {
        self.check_request(key)
    }
}
