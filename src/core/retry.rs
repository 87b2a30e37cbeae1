//! Exponential backoff for transient Sheets failures
//!
//! Every individual remote call is wrapped in [`with_backoff`]. Transient
//! server-side faults are recognized by substrings of the rendered error
//! message; anything else propagates immediately. The classification is a
//! heuristic, not a typed taxonomy, so a transient error whose message lacks
//! these markers is simply not retried.

use crate::domain::Result;
use std::future::Future;
use std::time::Duration;

/// Message fragments that indicate a retryable server-side fault
pub const TRANSIENT_MARKERS: [&str; 4] = ["500", "Internal", "backendError", "Internal error"];

/// Backoff policy: total attempt count and the exponential base in seconds
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,

    /// Sleep `base_secs ^ attempt` seconds before retry `attempt + 1`
    pub base_secs: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_secs: 1.8,
        }
    }
}

/// Whether an error message looks like a transient server-side fault.
pub fn is_transient_message(message: &str) -> bool {
    TRANSIENT_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Run `operation`, retrying transient failures with exponential backoff.
///
/// On a failure whose message carries a transient marker, sleeps
/// `base_secs ^ attempt` seconds (attempt counting from zero) and tries
/// again, up to `policy.attempts` total attempts. Non-transient failures
/// and exhausted retries propagate the last error unchanged.
pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let message = e.to_string();
                if !is_transient_message(&message) || attempt + 1 >= policy.attempts {
                    return Err(e);
                }

                let delay_secs = policy.base_secs.powi(attempt as i32);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.attempts,
                    delay_secs = delay_secs,
                    error = %e,
                    "Transient Sheets error, backing off"
                );
                tokio::time::sleep(Duration::from_secs_f64(delay_secs)).await;
                attempt += 1;
            }
        }
    }
}
