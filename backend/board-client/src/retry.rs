//! Caller-side retry for idempotent reads.
//!
//! The executor makes exactly one attempt per call. Screens that can
//! tolerate a replay (list reads, detail fetches) wrap the call here;
//! mutating calls should not.

use crate::executor::GuardedOutcome;

use std::future::Future;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use log::{debug, warn};
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Give up once this much time has passed since the first attempt.
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_delay,
            current_interval: self.initial_delay,
            max_interval: self.max_delay,
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        }
    }
}

/// Re-run `operation` while it fails with a retryable error.
///
/// Network timeouts, connection failures and 429/502/503/504 are retried.
/// `Unauthenticated`, parse errors and other HTTP errors return at once.
pub async fn retry_transient<T, Op, Fut>(
    policy: &RetryPolicy,
    mut operation: Op,
) -> GuardedOutcome<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = GuardedOutcome<T>>,
{
    let mut backoff = policy.backoff();
    let mut attempt: u32 = 0;

    loop {
        let outcome = operation().await;

        let error = match &outcome {
            GuardedOutcome::Failure(error) if error.is_retryable() => error,
            _ => return outcome,
        };

        if attempt >= policy.max_retries {
            warn!("Giving up after {} attempts: {error}", attempt + 1);
            return outcome;
        }

        match backoff.next_backoff() {
            Some(delay) => {
                attempt += 1;
                debug!(
                    "Retryable failure ({}), attempt {attempt}/{} after {delay:?}",
                    error.error_category(),
                    policy.max_retries
                );
                sleep(delay).await;
            }
            None => {
                warn!("Retry window of {:?} exhausted: {error}", policy.max_elapsed);
                return outcome;
            }
        }
    }
}
