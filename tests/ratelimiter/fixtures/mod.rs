// tests/ratelimiter/fixtures/mod.rs

pub mod manual_time;
