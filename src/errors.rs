// src/errors.rs

// error handling for limiter construction

// dependencies
use thiserror::Error;

/// Error type for limiter configuration issues.
///
/// Only construction is fallible; once a limiter exists, `allow` always
/// produces a decision.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimiterError {
    /// Token refill rate was zero, negative, or not finite.
    #[error("rate must be a finite value > 0, got {0}")]
    InvalidRate(f64),

    /// Burst capacity was below one token.
    #[error("burst must be >= 1, got {0}")]
    InvalidBurst(u32),

    /// Per-window request limit was below one.
    #[error("limit must be >= 1, got {0}")]
    InvalidLimit(u32),

    /// Window size was zero.
    #[error("window must be > 0")]
    InvalidWindow,
}

/// Result type alias for limiter construction.
pub type Result<T> = std::result::Result<T, LimiterError>;
