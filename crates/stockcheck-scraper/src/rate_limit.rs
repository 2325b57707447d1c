//! Retry utilities for transient upstream failures.
//!
//! Provides exponential backoff retry logic for network errors, HTTP 429 and
//! 5xx responses. Everything else (4xx, malformed bodies, GraphQL errors,
//! empty results) is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ScraperError::RateLimited`]: HTTP 429; the server has asked us to back off.
/// - [`ScraperError::Http`]: network-level failure (connection reset, timeout, etc.).
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps for `backoff_base_secs * 2^attempt`
/// seconds, or for the server's `Retry-After` when a 429 asks for longer, and
/// tries again, up to `max_retries` additional attempts after the
/// first try. With `max_retries = 0` the operation runs exactly once.
///
/// Non-retriable errors are returned immediately without sleeping or retrying.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        let backoff_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        let delay_secs = match &last_err {
            ScraperError::RateLimited {
                retry_after_secs, ..
            } => backoff_secs.max(*retry_after_secs),
            _ => backoff_secs,
        };
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient upstream error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
