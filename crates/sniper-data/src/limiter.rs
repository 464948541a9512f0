//! Token-bucket rate limiter with continuous refill.

use sniper_core::{Clock, SystemClock};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket: `capacity` requests per `period`, refilled continuously.
///
/// Refill happens lazily on access, so an idle limiter costs nothing. The
/// clock is injectable to make refill deterministic under test.
pub struct RateLimiter {
    capacity: u32,
    period: Duration,
    clock: Arc<dyn Clock>,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// A full bucket of `capacity` tokens refilling over `period`.
    pub fn new(capacity: u32, period: Duration) -> Self {
        Self::with_clock(capacity, period, Arc::new(SystemClock))
    }

    pub fn with_clock(capacity: u32, period: Duration, clock: Arc<dyn Clock>) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        assert!(!period.is_zero(), "period must be positive");
        let bucket = Bucket {
            tokens: capacity as f64,
            last_refill: clock.now(),
        };
        Self {
            capacity,
            period,
            clock,
            bucket: Mutex::new(bucket),
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(bucket.last_refill);
        let rate = self.capacity as f64 / self.period.as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * rate).min(self.capacity as f64);
        bucket.last_refill = now;
    }

    /// Take a token without waiting. Returns false when the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap();
        self.refill(&mut bucket);
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            debug!(remaining = bucket.tokens, "rate limit token unavailable");
            false
        }
    }

    /// Take a token, sleeping until one has refilled if necessary.
    ///
    /// Loops until a whole token is available, so a concurrent caller that
    /// grabs the refilled token just extends this caller's wait instead of
    /// letting it through early.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().unwrap();
                self.refill(&mut bucket);
                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }
                let deficit = 1.0 - bucket.tokens;
                Duration::from_secs_f64(deficit * self.period.as_secs_f64() / self.capacity as f64)
            };

            debug!(?wait, "rate limit reached, waiting for a token");
            tokio::time::sleep(wait).await;
        }
    }

    /// Tokens currently available, after refill.
    pub fn remaining(&self) -> f64 {
        let mut bucket = self.bucket.lock().unwrap();
        self.refill(&mut bucket);
        bucket.tokens
    }
}
