//! Request throttling
//!
//! Uses the governor crate for token bucket rate limiting. A single
//! `Throttle` is shared by every stream of a client, so concurrent
//! paginations draw from the same request budget.

use crate::config::RateLimitConfig;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket throttle, or a no-op when rate limiting is disabled
#[derive(Clone, Default)]
pub struct Throttle {
    limiter: Option<Arc<DirectLimiter>>,
}

impl Throttle {
    /// Create a throttle from config
    pub fn new(config: &RateLimitConfig) -> Self {
        if !config.enabled {
            return Self::unlimited();
        }

        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.burst_size).unwrap_or(rate);
        let quota = Quota::per_second(rate).allow_burst(burst);

        Self {
            limiter: Some(Arc::new(RateLimiter::direct(quota))),
        }
    }

    /// A throttle that never waits
    pub fn unlimited() -> Self {
        Self { limiter: None }
    }

    /// Whether requests are actually throttled
    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod throttle_tests {
    use super::*;
    use std::time::Duration;

    fn limited(rps: u32, burst: u32) -> RateLimitConfig {
        RateLimitConfig {
            enabled: true,
            requests_per_second: rps,
            burst_size: burst,
        }
    }

    /// Whether a permit is granted before the limiter would need to wait
    async fn ready_now(throttle: &Throttle) -> bool {
        tokio::time::timeout(Duration::from_millis(50), throttle.acquire())
            .await
            .is_ok()
    }

    #[tokio::test]
    async fn test_disabled_throttle_never_blocks() {
        let throttle = Throttle::new(&RateLimitConfig::disabled());
        assert!(!throttle.is_enabled());
        let all = async {
            for _ in 0..1000 {
                throttle.acquire().await;
            }
        };
        assert!(tokio::time::timeout(Duration::from_millis(200), all)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_burst_then_exhausted() {
        let throttle = Throttle::new(&limited(1, 3));
        assert!(throttle.is_enabled());

        for _ in 0..3 {
            assert!(ready_now(&throttle).await);
        }
        assert!(!ready_now(&throttle).await);
    }

    #[tokio::test]
    async fn test_zero_rate_falls_back_to_one() {
        let throttle = Throttle::new(&limited(0, 0));
        assert!(ready_now(&throttle).await);
        assert!(!ready_now(&throttle).await);
    }

    #[tokio::test]
    async fn test_clones_share_budget() {
        let throttle = Throttle::new(&limited(1, 2));
        let other = throttle.clone();

        assert!(ready_now(&throttle).await);
        assert!(ready_now(&other).await);
        assert!(!ready_now(&throttle).await);
    }
}
