use std::future::Future;

use tracing::debug;

use crate::api::ApiError;
use crate::retry::policy::RetryPolicy;

/// Run `op` until it succeeds, fails with a non-retryable error, or the retry
/// budget is spent.
///
/// `on_retry(error, retry)` fires once per retry, before the backoff sleep,
/// with the 1-based retry number. The last error is returned unchanged.
pub async fn retry_async<T, F, Fut, R>(
    policy: &RetryPolicy,
    mut op: F,
    mut on_retry: R,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    R: FnMut(&ApiError, u32),
{
    let mut retry = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => {
                debug!(
                    event = "core.retry.not_retryable",
                    operation = err.operation,
                    attempt = retry + 1,
                );
                return Err(err);
            }
            Err(err) if retry + 1 >= policy.max_attempts() => {
                debug!(
                    event = "core.retry.budget_exhausted",
                    operation = err.operation,
                    attempts = retry + 1,
                );
                return Err(err);
            }
            Err(err) => {
                retry += 1;
                on_retry(&err, retry);

                let wait = policy.backoff(retry);
                debug!(
                    event = "core.retry.backoff_scheduled",
                    operation = err.operation,
                    retry = retry,
                    wait_ms = wait.as_millis() as u64,
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}
