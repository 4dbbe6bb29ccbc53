// src/limiter.rs

//! The capability shared by every limiting algorithm.

// dependencies
use std::sync::Arc;
use std::time::Duration;

/// A per-key rate limiter.
///
/// Callers pick an algorithm at construction time and then only talk to this
/// trait, so swapping a token bucket for a fixed window needs no other change.
pub trait Limiter: Send + Sync {
    /// Decide whether a request for `key` may proceed right now.
    ///
    /// Never blocks and never fails. Sleeping on a denial is up to the caller.
    fn allow(&self, key: &str) -> Decision;
}

impl<L: Limiter + ?Sized> Limiter for Arc<L> {
    fn allow(&self, key: &str) -> Decision {
        (**self).allow(key)
    }
}

impl<L: Limiter + ?Sized> Limiter for Box<L> {
    fn allow(&self, key: &str) -> Decision {
        (**self).allow(key)
    }
}

/// Outcome of a single `allow` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request should be allowed
    pub allowed: bool,
    /// Estimated wait before a retry could succeed; zero when allowed
    pub retry_after: Duration,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after: Duration::ZERO,
        }
    }

    /// A denial. The wait is floored at one nanosecond so a denial never
    /// reads as "retry immediately".
    pub fn deny(retry_after: Duration) -> Self {
        Self {
            allowed: false,
            retry_after: retry_after.max(Duration::from_nanos(1)),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

/// Round a fractional nanosecond wait up to the next whole nanosecond,
/// with a floor of one.
pub(crate) fn retry_after_from_nanos(nanos: f64) -> Duration {
    let rounded = nanos.ceil();
    if rounded.is_nan() || rounded < 1.0 {
        return Duration::from_nanos(1);
    }
    // float-to-int casts saturate
    Duration::from_nanos(rounded as u64)
}
