// tests/ratelimiter/token_bucket_tests.rs

#[cfg(test)]
mod tests {
    use crate::fixtures::manual_time::{clock_at, ms, token_bucket};
    use std::time::Duration;

    #[test]
    fn first_request_always_allowed() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(1.0, 1, &clock);
        let decision = limiter.check_request("client1");
        assert!(decision.allowed);
        assert_eq!(decision.retry_after, Duration::ZERO);
    }

    #[test]
    fn full_burst_then_denial_with_exact_retry_after() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(5.0, 10, &clock);

        for i in 0..10 {
            assert!(limiter.check_request("k").allowed, "request {i} should pass");
        }

        let denied = limiter.check_request("k");
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after, ms(200));
    }

    #[test]
    fn waiting_retry_after_is_enough() {
        let clock = clock_at(3.0);
        let limiter = token_bucket(3.0, 2, &clock);

        assert!(limiter.check_request("k").allowed);
        assert!(limiter.check_request("k").allowed);

        let denied = limiter.check_request("k");
        assert!(!denied.allowed);
        assert!(denied.retry_after > Duration::ZERO);

        clock.add(denied.retry_after);
        assert!(limiter.check_request("k").allowed);
        assert!(!limiter.check_request("k").allowed);
    }

    #[test]
    fn time_progression_refills_tokens() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(2.0, 1, &clock); // 2 tokens/sec, burst of 1
        let client = "client1";

        assert!(limiter.check_request(client).allowed);
        assert!(!limiter.check_request(client).allowed);

        // Half a token after 0.25 seconds is not enough
        clock.add(ms(250));
        let decision = limiter.check_request(client);
        assert!(!decision.allowed);
        assert_eq!(decision.retry_after, ms(250));

        clock.add(ms(250));
        assert!(limiter.check_request(client).allowed);

        // Long idle period never refills past the burst
        clock.add(Duration::from_secs(3600));
        assert!(limiter.check_request(client).allowed);
        assert!(!limiter.check_request(client).allowed);
    }

    #[test]
    fn multiple_clients_independent() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(1.0, 1, &clock);

        assert!(limiter.check_request("client1").allowed);
        assert!(limiter.check_request("client2").allowed);

        assert!(!limiter.check_request("client1").allowed);
        assert!(!limiter.check_request("client2").allowed);

        // A new client is unaffected by exhausted neighbours
        assert!(limiter.check_request("client3").allowed);
        assert_eq!(limiter.tracked_keys(), 3);
    }

    #[test]
    fn backward_clock_grants_nothing_extra() {
        let clock = clock_at(10.0);
        let limiter = token_bucket(5.0, 2, &clock);

        assert!(limiter.check_request("k").allowed);
        assert!(limiter.check_request("k").allowed);
        assert!(!limiter.check_request("k").allowed);

        // Jumping back five seconds must not mint tokens
        clock.set(Duration::from_secs(5));
        assert!(!limiter.check_request("k").allowed);

        // Refill resumes from the resynced instant
        clock.add(ms(200));
        assert!(limiter.check_request("k").allowed);
        assert!(!limiter.check_request("k").allowed);
    }

    #[test]
    fn small_shortfall_never_reports_zero_retry_after() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(1_000_000_000.0, 1, &clock);

        assert!(limiter.check_request("k").allowed);
        let denied = limiter.check_request("k");
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after, Duration::from_nanos(1));
    }

    #[test]
    fn fractional_rate_rounds_retry_after_up() {
        let clock = clock_at(0.0);
        let limiter = token_bucket(3.0, 1, &clock);

        assert!(limiter.check_request("k").allowed);
        let denied = limiter.check_request("k");
        assert!(!denied.allowed);
        // 1/3 s rounded up to the next nanosecond
        assert_eq!(denied.retry_after, Duration::from_nanos(333_333_334));
    }
}
