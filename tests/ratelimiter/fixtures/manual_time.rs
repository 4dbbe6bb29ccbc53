// tests/ratelimiter/fixtures/manual_time.rs

// dependencies
use keyed_limiter::{FixedWindow, FixedWindowConfig, ManualClock, TokenBucket, TokenBucketConfig};
use std::sync::Arc;
use std::time::Duration;

// Shared manual clock starting `seconds` past the epoch
pub fn clock_at(seconds: f64) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Duration::from_secs_f64(seconds)))
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn token_bucket(rate: f64, burst: u32, clock: &Arc<ManualClock>) -> TokenBucket {
    let config = TokenBucketConfig::new(rate, burst).clock(clock.clone());
    TokenBucket::with_config(config).unwrap()
}

pub fn fixed_window(limit: u32, window: Duration, clock: &Arc<ManualClock>) -> FixedWindow {
    let config = FixedWindowConfig::new(limit, window).clock(clock.clone());
    FixedWindow::with_config(config).unwrap()
}
