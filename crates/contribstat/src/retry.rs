//! Retry utilities for GitLab API calls.
//!
//! Every network call in the pipeline goes through [`with_retry`]: a fixed
//! exponential backoff schedule with no jitter, so the retry timing of a run
//! is deterministic.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::stats::{INITIAL_BACKOFF_MS, MAX_BACKOFF_MS, MAX_FETCH_ATTEMPTS};
use crate::stats::{ProgressCallback, StatsProgress, emit};

/// Configuration for retry operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the first retry.
    pub min_delay: Duration,
    /// Cap on the doubling delay.
    pub max_delay: Duration,
    /// Total attempts, the first try included.
    pub max_attempts: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_MS),
            max_attempts: MAX_FETCH_ATTEMPTS,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn new(min_delay: Duration, max_delay: Duration, max_attempts: usize) -> Self {
        Self {
            min_delay,
            max_delay,
            max_attempts,
        }
    }

    /// Build the exponential backoff strategy from this configuration.
    ///
    /// The delay doubles per attempt, starting at `min_delay`, capped at
    /// `max_delay`, without jitter.
    #[must_use]
    pub fn as_backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.saturating_sub(1))
    }
}

/// Execute an operation, retrying every failure on the configured schedule.
///
/// Tracks the attempt number with an atomic counter, reports each retry via
/// the progress callback, and logs it at debug level. The error of the final
/// attempt is returned unchanged.
pub async fn with_retry<T, E, F, Fut, ShortMsg>(
    mut operation: F,
    config: &RetryConfig,
    short_message: ShortMsg,
    context: &str,
    on_progress: Option<&ProgressCallback>,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
    ShortMsg: Fn(&E) -> String + Send + Sync + 'static,
{
    let context_str = context.to_string();

    // Track attempt number for progress reporting
    let attempt = AtomicU32::new(0);

    let retry_op = || {
        attempt.fetch_add(1, Ordering::SeqCst);
        operation()
    };

    retry_op
        .retry(config.as_backoff())
        .notify(|err, dur| {
            let current_attempt = attempt.load(Ordering::SeqCst);
            emit(
                on_progress,
                StatsProgress::Retrying {
                    context: context_str.clone(),
                    retry_after_ms: dur.as_millis() as u64,
                    attempt: current_attempt,
                },
            );
            tracing::debug!(
                "{} failed, retrying in {:?} (attempt {}): {}",
                context_str,
                dur,
                current_attempt,
                short_message(err)
            );
        })
        .await
}
