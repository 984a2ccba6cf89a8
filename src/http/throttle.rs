//! Client-side request throttle
//!
//! Token bucket (governor) that spaces requests so a long pagination walk
//! stays inside the directory API's per-user query quota.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Throttle settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before spacing kicks in
    pub burst: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        // 2400 queries/minute/user is the documented Directory API default
        Self {
            requests_per_second: 40,
            burst: 40,
        }
    }
}

impl ThrottleConfig {
    /// Create a throttle config
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        Self {
            requests_per_second,
            burst,
        }
    }

    fn quota(&self) -> Quota {
        let rate = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(rate).allow_burst(burst)
    }
}

/// Shared token bucket
#[derive(Clone)]
pub struct RequestThrottle {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RequestThrottle {
    /// Create a throttle
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(config.quota())),
        }
    }

    /// Wait for the next request slot
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a slot if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestThrottle").finish_non_exhaustive()
    }
}
