// src/config.rs

//! Configuration types for the limiters

// dependencies
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::errors::{LimiterError, Result};

/// Idle-state eviction settings shared by both algorithms.
///
/// Eviction is off unless `state_ttl` is set to a non-zero duration.
#[derive(Debug, Clone, Default)]
pub(crate) struct EvictionConfig {
    pub(crate) state_ttl: Option<Duration>,
    pub(crate) cleanup_interval: Option<Duration>,
}

/// Configuration for a token bucket limiter
#[derive(Debug, Clone)]
pub struct TokenBucketConfig {
    pub(crate) rate_per_second: f64,
    pub(crate) burst: u32,
    pub(crate) clock: Option<Arc<dyn Clock>>,
    pub(crate) eviction: EvictionConfig,
}

impl TokenBucketConfig {
    /// Create a new configuration with rate and burst settings
    pub fn new(rate_per_second: f64, burst: u32) -> Self {
        Self {
            rate_per_second,
            burst,
            clock: None,
            eviction: EvictionConfig::default(),
        }
    }

    /// Builder-style: set tokens added per second
    pub fn rate(mut self, rate_per_second: f64) -> Self {
        self.rate_per_second = rate_per_second;
        self
    }

    /// Builder-style: set maximum (and initial) token count
    pub fn burst(mut self, burst: u32) -> Self {
        self.burst = burst;
        self
    }

    /// Builder-style: inject a time source. Defaults to `SystemClock`.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builder-style: evict keys idle for longer than `ttl`
    pub fn state_ttl(mut self, ttl: Duration) -> Self {
        self.eviction.state_ttl = Some(ttl);
        self
    }

    /// Builder-style: minimum spacing between eviction sweeps
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.eviction.cleanup_interval = Some(interval);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.rate_per_second.is_finite() && self.rate_per_second > 0.0) {
            return Err(LimiterError::InvalidRate(self.rate_per_second));
        }
        if self.burst < 1 {
            return Err(LimiterError::InvalidBurst(self.burst));
        }
        Ok(())
    }
}

/// Configuration for a fixed window limiter
#[derive(Debug, Clone)]
pub struct FixedWindowConfig {
    pub(crate) limit: u32,
    pub(crate) window: Duration,
    pub(crate) clock: Option<Arc<dyn Clock>>,
    pub(crate) eviction: EvictionConfig,
}

impl FixedWindowConfig {
    /// Create a new configuration allowing `limit` requests per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clock: None,
            eviction: EvictionConfig::default(),
        }
    }

    /// Builder-style: set requests allowed per window
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Builder-style: set window size
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Builder-style: inject a time source. Defaults to `SystemClock`.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builder-style: evict keys idle for longer than `ttl`
    pub fn state_ttl(mut self, ttl: Duration) -> Self {
        self.eviction.state_ttl = Some(ttl);
        self
    }

    /// Builder-style: minimum spacing between eviction sweeps
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.eviction.cleanup_interval = Some(interval);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(LimiterError::InvalidLimit(self.limit));
        }
        if self.window.is_zero() {
            return Err(LimiterError::InvalidWindow);
        }
        Ok(())
    }
}

pub(crate) fn clock_or_system(clock: Option<Arc<dyn Clock>>) -> Arc<dyn Clock> {
    clock.unwrap_or_else(|| Arc::new(SystemClock::new()))
}
