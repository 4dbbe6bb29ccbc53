// src/lib.rs

//! # Keyed Limiter
//!
//! In-process, per-key admission control. Two algorithms, a token bucket and
//! a fixed window, sit behind one [`Limiter`] trait that answers "may this
//! key proceed now, and if not, how long until it can".
//!
//! ## Quick Example
//!
//! ```rust
//! use keyed_limiter::{Limiter, TokenBucket};
//!
//! let limiter = TokenBucket::new(5.0, 10).unwrap();
//!
//! let decision = limiter.allow("user_123");
//! if decision.allowed {
//!     println!("Request allowed");
//! } else {
//!     println!("Rate limited - retry after {:?}", decision.retry_after);
//! }
//! ```
//!
//! ## Deterministic time
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use keyed_limiter::{FixedWindow, FixedWindowConfig, Limiter, ManualClock};
//!
//! let clock = Arc::new(ManualClock::new(Duration::ZERO));
//! let config = FixedWindowConfig::new(1, Duration::from_secs(1)).clock(clock.clone());
//! let limiter = FixedWindow::with_config(config).unwrap();
//!
//! assert!(limiter.allow("k").allowed);
//! assert!(!limiter.allow("k").allowed);
//!
//! clock.add(Duration::from_secs(1));
//! assert!(limiter.allow("k").allowed);
//! ```

// private modules
mod cleanup;
mod clock;
mod config;
mod errors;
mod fixed_window;
mod limiter;
mod token_bucket;

// public API exports
pub use clock::{Clock, ManualClock, SystemClock, duration_to_nanos};
pub use config::{FixedWindowConfig, TokenBucketConfig};
pub use errors::{LimiterError, Result};
pub use fixed_window::FixedWindow;
pub use limiter::{Decision, Limiter};
pub use token_bucket::TokenBucket;
