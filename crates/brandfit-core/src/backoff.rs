//! Retry policy shared by the outbound HTTP clients.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

const MAX_DELAY: Duration = Duration::from_secs(60);

/// Errors that say whether another attempt might succeed.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Exponential back-off: retry `n` (1-based) waits `base * 2^(n-1)`, capped
/// at one minute, optionally scaled by a ±25 % jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    max_retries: u32,
    base: Duration,
    jitter: bool,
}

impl Backoff {
    #[must_use]
    pub fn new(max_retries: u32, base_secs: u64) -> Self {
        Self {
            max_retries,
            base: Duration::from_secs(base_secs),
            jitter: false,
        }
    }

    #[must_use]
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Un-jittered delay before retry number `attempt`, or `None` once the
    /// budget is spent.
    #[must_use]
    pub fn nominal_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_retries {
            return None;
        }
        let factor = 1u32 << (attempt - 1).min(10);
        Some(self.base.saturating_mul(factor).min(MAX_DELAY))
    }

    fn delay(&self, attempt: u32) -> Option<Duration> {
        let delay = self.nominal_delay(attempt)?;
        if self.jitter {
            Some(delay.mul_f64(rand::random::<f64>() * 0.5 + 0.75))
        } else {
            Some(delay)
        }
    }

    /// Runs `operation`, retrying while the error is transient and the budget
    /// allows. `what` names the call in the retry log line.
    ///
    /// # Errors
    ///
    /// Returns the first permanent error, or the last transient one once the
    /// retries are used up.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut operation: F) -> Result<T, E>
    where
        E: Transient + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            attempt += 1;
            let delay = match self.delay(attempt) {
                Some(delay) if err.is_transient() => delay,
                _ => return Err(err),
            };
            tracing::warn!(
                what,
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient failure; backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
