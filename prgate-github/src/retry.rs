//! Bounded retry for transient GitHub failures

use std::future::Future;

use prgate_core::RetryPolicy;
use tracing::warn;

use crate::Result;

/// Run `call` until it succeeds, fails permanently, or attempts run out
///
/// Only errors for which [`crate::Error::is_transient`] holds are retried.
pub(crate) async fn with_retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = policy.backoff(attempt);
                warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient GitHub failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
