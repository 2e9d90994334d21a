//! Reusable retry combinator with randomized exponential backoff.
//!
//! The extraction call is the sole rate-limited network operation in the
//! pipeline, so its retry behavior lives here as a standalone combinator
//! parameterized by (min delay, max delay, max attempts) rather than being
//! inlined at the call site.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::warn;
use rand::Rng;

/// Backoff parameters for [`retry_with_backoff`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            max_attempts: 6,
        }
    }
}

impl RetryPolicy {
    /// Jittered delay before the retry following `attempt` (1-based).
    ///
    /// The exponential cap doubles per attempt, clamped to `max_delay`;
    /// the actual delay is drawn uniformly between `min_delay` and the cap.
    fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        let cap = self
            .min_delay
            .saturating_mul(1u32 << exp)
            .min(self.max_delay)
            .max(self.min_delay);

        let min_ms = self.min_delay.min(cap).as_millis() as u64;
        let cap_ms = cap.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min_ms..=cap_ms))
    }
}

/// Run `op` until it succeeds, an attempt fails with a non-retryable
/// error, or `max_attempts` attempts have been made. The final error is
/// returned unchanged.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: RetryPolicy,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= policy.max_attempts || !is_retryable(&e) => return Err(e),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "Attempt {attempt}/{} failed ({e}); retrying in {:.1}s",
                    policy.max_attempts,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
