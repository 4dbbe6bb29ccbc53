// src/token_bucket.rs

// token bucket: continuous lazy refill up to a burst cap

// dependencies
use crate::cleanup::Sweeper;
use crate::clock::Clock;
use crate::config::{TokenBucketConfig, clock_or_system};
use crate::errors::Result;
use crate::limiter::{Decision, Limiter, retry_after_from_nanos};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Per-key bucket. `tokens` stays within `[0, burst]`.
#[derive(Debug, Clone)]
struct BucketState {
    tokens: f64,
    last_refill: u64,
    last_seen: u64,
}

impl BucketState {
    fn full(burst: f64, now: u64) -> Self {
        Self {
            tokens: burst,
            last_refill: now,
            last_seen: now,
        }
    }

    // add tokens for the time since the last refill; a clock behind
    // `last_refill` only resyncs the timestamp
    fn refill(&mut self, now: u64, rate_per_second: f64, burst: f64) {
        if now > self.last_refill {
            let elapsed_nanos = (now - self.last_refill) as f64;
            let added = elapsed_nanos * rate_per_second / NANOS_PER_SEC;
            self.tokens = (self.tokens + added).min(burst);
        }
        self.last_refill = now;
    }
}

#[derive(Debug)]
struct Buckets {
    states: HashMap<String, BucketState>,
    sweeper: Option<Sweeper>,
}

/// Token bucket limiter.
///
/// Each key starts with `burst` tokens and regains `rate` tokens per second,
/// computed on access rather than by a timer. One mutex guards every key.
#[derive(Debug)]
pub struct TokenBucket {
    rate_per_second: f64,
    burst: f64,
    clock: Arc<dyn Clock>,
    buckets: Mutex<Buckets>,
}

// methods for the TokenBucket type
impl TokenBucket {
    /// Create a bucket refilling at `rate_per_second` with capacity `burst`,
    /// using the system clock and no eviction.
    pub fn new(rate_per_second: f64, burst: u32) -> Result<Self> {
        Self::with_config(TokenBucketConfig::new(rate_per_second, burst))
    }

    // method to create a new token bucket from a config object
    pub fn with_config(config: TokenBucketConfig) -> Result<Self> {
        config.validate()?;

        let clock = clock_or_system(config.clock);
        let sweeper = Sweeper::new(
            config.eviction.state_ttl,
            config.eviction.cleanup_interval,
            clock.now(),
        );

        debug!(
            rate = config.rate_per_second,
            burst = config.burst,
            state_ttl = ?config.eviction.state_ttl,
            "Created token bucket limiter"
        );

        Ok(Self {
            rate_per_second: config.rate_per_second,
            burst: f64::from(config.burst),
            clock,
            buckets: Mutex::new(Buckets {
                states: HashMap::new(),
                sweeper,
            }),
        })
    }

    // accessor method to return tokens added per second
    pub fn rate(&self) -> f64 {
        self.rate_per_second
    }

    // accessor method to return the bucket capacity
    pub fn burst(&self) -> u32 {
        self.burst as u32
    }

    /// Number of keys currently holding state.
    pub fn tracked_keys(&self) -> usize {
        self.buckets.lock().states.len()
    }

    pub fn check_request(&self, key: &str) -> Decision {
        let mut guard = self.buckets.lock();
        let buckets = &mut *guard;
        let now = self.clock.now();

        if let Some(sweeper) = buckets.sweeper.as_mut() {
            sweeper.maybe_sweep(now, &mut buckets.states, |state| state.last_seen);
        }

        let state = buckets
            .states
            .entry(key.to_owned())
            .and_modify(|state| {
                if now < state.last_refill {
                    debug!(key, "Clock moved backwards, resyncing bucket");
                }
                state.refill(now, self.rate_per_second, self.burst);
            })
            .or_insert_with(|| {
                debug!(key, burst = self.burst, "Creating token bucket state");
                BucketState::full(self.burst, now)
            });
        state.last_seen = now;

        let decision = if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            Decision::allow()
        } else {
            let shortfall = 1.0 - state.tokens;
            Decision::deny(retry_after_from_nanos(
                shortfall * NANOS_PER_SEC / self.rate_per_second,
            ))
        };

        trace!(
            key,
            allowed = decision.allowed,
            retry_after = ?decision.retry_after,
            tokens = state.tokens,
            "Token bucket decision"
        );
        decision
    }
}

impl Limiter for TokenBucket {
    fn allow(&self, key: &str) -> Decision {
        self.check_request(key)
    }
}
