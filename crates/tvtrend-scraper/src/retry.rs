//! Retry with exponential backoff for transient fetch errors.
//!
//! Non-retriable errors (404, unexpected status, bad base URL) are
//! propagated immediately without retrying.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable:
/// - [`ScraperError::RateLimited`] — HTTP 429; the server asked us to back off.
/// - [`ScraperError::Http`] — network-level failure (reset, timeout, ...).
///
/// Non-retriable:
/// - [`ScraperError::NotFound`] — the aggregator's end-of-data signal;
///   retrying would return the same result.
/// - [`ScraperError::UnexpectedStatus`] and [`ScraperError::InvalidBaseUrl`].
fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::RateLimited { .. } | ScraperError::Http(_)
    )
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps `backoff_base_secs * 2^attempt`
/// seconds and tries again, up to `max_retries` additional attempts after
/// the first try. When retries are exhausted the last error is returned.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }

                let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
                tracing::warn!(
                    attempt,
                    delay_secs,
                    error = %err,
                    "transient fetch error; backing off before retry"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_returns_immediately() {
        let result: Result<u32, _> = retry_with_backoff(3, 0, || async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let mut calls = 0u32;
        let result: Result<(), _> = retry_with_backoff(3, 0, || {
            calls += 1;
            async {
                Err(ScraperError::NotFound {
                    url: "http://x/title/tt1/episodes?season=9".into(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
        assert_eq!(calls, 1, "NotFound must not be retried");
    }

    #[tokio::test]
    async fn rate_limited_retries_until_success() {
        let mut calls = 0u32;
        let result = retry_with_backoff(3, 0, || {
            calls += 1;
            let n = calls;
            async move {
                if n < 3 {
                    Err(ScraperError::RateLimited {
                        retry_after_secs: 0,
                    })
                } else {
                    Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_error() {
        let mut calls = 0u32;
        let result: Result<(), _> = retry_with_backoff(2, 0, || {
            calls += 1;
            async {
                Err(ScraperError::RateLimited {
                    retry_after_secs: 1,
                })
            }
        })
        .await;
        assert!(matches!(result, Err(ScraperError::RateLimited { .. })));
        assert_eq!(calls, 3, "1 initial attempt + 2 retries");
    }
}
