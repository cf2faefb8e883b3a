use crate::foundation::{VoteSproutError, DEFAULT_RECEIPT_POLL_ATTEMPTS, DEFAULT_RECEIPT_POLL_INTERVAL_MS};
use log::trace;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(60);

/// Bounded polling/retry policy: `max_attempts` tries, `interval` between them,
/// each subsequent delay multiplied by `backoff_multiplier` (1.0 keeps it fixed).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

const fn default_max_attempts() -> u32 {
    DEFAULT_RECEIPT_POLL_ATTEMPTS
}

const fn default_interval_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_INTERVAL_MS
}

const fn default_backoff_multiplier() -> f64 {
    1.0
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: default_max_attempts(), interval_ms: default_interval_ms(), backoff_multiplier: default_backoff_multiplier() }
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self { max_attempts, interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX), backoff_multiplier: 1.0 }
    }

    /// Delay after the attempt with the given zero-based index.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.interval_ms);
        if self.backoff_multiplier <= 1.0 || attempt == 0 {
            return base;
        }
        let factor = self.backoff_multiplier.powi(i32::try_from(attempt).unwrap_or(i32::MAX));
        let scaled = base.as_secs_f64() * factor;
        if !scaled.is_finite() || scaled >= MAX_BACKOFF_DELAY.as_secs_f64() {
            return MAX_BACKOFF_DELAY;
        }
        Duration::from_secs_f64(scaled)
    }

    /// Time spent sleeping when every attempt comes back empty.
    pub fn total_wait(&self) -> Duration {
        (0..self.max_attempts).map(|attempt| self.delay_after(attempt)).sum()
    }
}

/// Poll `op` until it yields `Some`, at most `policy.max_attempts` times.
///
/// Errors abort immediately; only empty results are retried. Every empty attempt,
/// the last one included, is followed by its delay, so a fruitless poll lasts
/// `policy.total_wait()`. Returns `Ok(None)` once the attempts are exhausted.
pub async fn poll_until_some<F, Fut, T>(policy: &RetryPolicy, mut op: F) -> Result<Option<T>, VoteSproutError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, VoteSproutError>>,
{
    for attempt in 0..policy.max_attempts {
        if let Some(value) = op(attempt).await? {
            return Ok(Some(value));
        }
        let delay = policy.delay_after(attempt);
        trace!("poll attempt empty attempt={} delay_ms={}", attempt + 1, delay.as_millis());
        sleep(delay).await;
    }
    Ok(None)
}
