//! Retry policy for storage writes
//!
//! One explicit policy (attempt cap plus backoff schedule) applied as a
//! combinator around any fallible storage operation, instead of
//! re-deriving backoff arithmetic at every call site. Only transient
//! storage failures retry; everything else returns on the first attempt.

use crate::domain::{LedgerError, Result};
use crate::log_retry_attempt;
use std::future::Future;
use std::time::Duration;

/// Bounded retry with a configured backoff schedule
///
/// `max_attempts` counts total attempts, so a policy of 3 means one
/// initial try plus two retries. The backoff schedule is indexed by the
/// attempt that just failed; a schedule shorter than the attempt count
/// reuses its last delay.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Vec<Duration>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_ms: &[u64]) -> Self {
        let backoff = if backoff_ms.is_empty() {
            vec![Duration::from_millis(1000)]
        } else {
            backoff_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect()
        };

        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to sleep after the given failed attempt (1-based)
    fn delay_after(&self, attempt: u32) -> Duration {
        let index = (attempt.saturating_sub(1) as usize).min(self.backoff.len() - 1);
        self.backoff[index]
    }

    /// Runs `operation` until it succeeds, fails permanently, or the
    /// attempt cap is reached
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_retryable(&e) => {
                    let delay = self.delay_after(attempt);
                    log_retry_attempt!(attempt, self.max_attempts, e);
                    tracing::debug!(delay_ms = delay.as_millis() as u64, "Backing off");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an error is worth another attempt
fn is_retryable(error: &LedgerError) -> bool {
    matches!(error, LedgerError::Storage(e) if e.is_transient())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StorageError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> LedgerError {
        StorageError::Unavailable("gateway unavailable".to_string()).into()
    }

    fn permanent() -> LedgerError {
        StorageError::Rejected("constraint violation".to_string()).into()
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_uses_exactly_max_attempts() {
        let policy = RetryPolicy::new(3, &[100, 200, 300]);
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_transient_failures() {
        let policy = RetryPolicy::new(3, &[100, 200, 300]);
        let calls = AtomicU32::new(0);

        let result = policy
            .run(|| async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(transient())
                } else {
                    Ok(42u64)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_is_not_retried() {
        let policy = RetryPolicy::new(3, &[100, 200, 300]);
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(permanent())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_storage_errors_are_not_retried() {
        let policy = RetryPolicy::new(3, &[100]);
        let calls = AtomicU32::new(0);

        let result: Result<()> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(LedgerError::Validation("bad input".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_schedule_is_honored() {
        let policy = RetryPolicy::new(3, &[100, 200, 300]);
        let start = tokio::time::Instant::now();

        let _: Result<()> = policy.run(|| async { Err(transient()) }).await;

        // Two sleeps between three attempts: 100ms + 200ms
        assert_eq!(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_schedule_reuses_last_delay() {
        let policy = RetryPolicy::new(4, &[50]);
        let start = tokio::time::Instant::now();

        let _: Result<()> = policy.run(|| async { Err(transient()) }).await;

        // Three sleeps, all at the only configured delay
        assert_eq!(start.elapsed(), Duration::from_millis(150));
    }

    #[test]
    fn test_empty_schedule_gets_a_default() {
        let policy = RetryPolicy::new(3, &[]);
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
    }

    #[test]
    fn test_attempt_floor_is_one() {
        let policy = RetryPolicy::new(0, &[100]);
        assert_eq!(policy.max_attempts(), 1);
    }
}
