// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exponential backoff for transport-level failures.
//!
//! Only `Err` results from the request future are retried. A response with
//! an error status is an `Ok` here and goes straight back to the caller.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Fixed retry policy.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each one after
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before a retry, given how many retries are still available.
    pub fn delay_for(&self, retries_remaining: u32) -> Duration {
        let exponent = self.max_retries.saturating_sub(retries_remaining);
        self.base_delay * 2u32.saturating_pow(exponent)
    }
}

/// Run `make_request` until it succeeds or the policy is exhausted.
///
/// Returns the last error unchanged once no retries remain.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut make_request: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut retries_remaining = policy.max_retries;

    loop {
        match make_request().await {
            Ok(value) => return Ok(value),
            Err(error) if retries_remaining > 0 => {
                let delay = policy.delay_for(retries_remaining);
                tracing::warn!(
                    operation,
                    error = %error,
                    attempt = policy.max_retries - retries_remaining + 1,
                    retries_remaining,
                    delay_ms = delay.as_millis() as u64,
                    "Request failed, retrying after delay"
                );
                tokio::time::sleep(delay).await;
                retries_remaining -= 1;
            }
            Err(error) => {
                if policy.max_retries > 0 {
                    tracing::warn!(
                        operation,
                        error = %error,
                        attempts = policy.max_retries + 1,
                        "Request failed after all retry attempts"
                    );
                }
                return Err(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_delay_doubles_per_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(3), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_exhausted_retries_return_last_error() {
        let attempts = Cell::new(0u32);
        let policy = fast_policy(3);

        let result: Result<(), String> = with_retry(&policy, "test", || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move { Err(format!("connection refused #{}", n)) }
        })
        .await;

        assert_eq!(attempts.get(), policy.max_retries + 1);
        assert_eq!(result.unwrap_err(), "connection refused #4");
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let attempts = Cell::new(0u32);

        let result: Result<&str, String> = with_retry(&fast_policy(3), "test", || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move {
                if n < 3 {
                    Err("reset".to_string())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test]
    async fn test_success_is_not_retried() {
        let attempts = Cell::new(0u32);

        let result: Result<u16, String> = with_retry(&fast_policy(3), "test", || {
            attempts.set(attempts.get() + 1);
            // An error status is still a response, not a transport failure.
            async { Ok(500) }
        })
        .await;

        assert_eq!(result.unwrap(), 500);
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_waits_exponentially() {
        let start = tokio::time::Instant::now();
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        };

        let _: Result<(), String> =
            with_retry(&policy, "test", || async { Err("down".to_string()) }).await;

        // 1s + 2s + 4s
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(7));
        assert!(elapsed < Duration::from_secs(8));
    }
}
