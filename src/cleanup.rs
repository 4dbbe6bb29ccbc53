// src/cleanup.rs

// lazy TTL eviction shared by both limiter algorithms

// dependencies
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::clock::duration_to_nanos;

/// Amortized eviction of idle per-key state.
///
/// There is no background thread. Each `allow` call offers the sweeper its
/// current instant and the sweeper decides whether a full pass is due.
#[derive(Debug)]
pub(crate) struct Sweeper {
    ttl_nanos: u64,
    interval_nanos: u64,
    last_cleanup: u64,
}

impl Sweeper {
    /// Build a sweeper, or `None` when `state_ttl` is absent or zero.
    /// A missing or zero `cleanup_interval` falls back to the TTL.
    pub(crate) fn new(
        state_ttl: Option<Duration>,
        cleanup_interval: Option<Duration>,
        now: u64,
    ) -> Option<Self> {
        let ttl_nanos = state_ttl.map(duration_to_nanos).filter(|&ttl| ttl > 0)?;
        let interval_nanos = cleanup_interval
            .map(duration_to_nanos)
            .filter(|&interval| interval > 0)
            .unwrap_or(ttl_nanos);

        Some(Self {
            ttl_nanos,
            interval_nanos,
            last_cleanup: now,
        })
    }

    /// Sweep `states` if a cleanup interval has elapsed since the last pass.
    ///
    /// `last_seen` reads the instant a key was last touched. Returns the
    /// number of evicted keys when a sweep ran.
    pub(crate) fn maybe_sweep<S>(
        &mut self,
        now: u64,
        states: &mut HashMap<String, S>,
        last_seen: impl Fn(&S) -> u64,
    ) -> Option<usize> {
        // a clock behind last_cleanup saturates to zero and never sweeps
        if now.saturating_sub(self.last_cleanup) < self.interval_nanos {
            return None;
        }

        let before = states.len();
        let ttl_nanos = self.ttl_nanos;
        states.retain(|_, state| now.saturating_sub(last_seen(state)) <= ttl_nanos);
        self.last_cleanup = now;

        let evicted = before - states.len();
        debug!(evicted, remaining = states.len(), "Swept idle limiter state");
        Some(evicted)
    }
}
