//! Deadlines for backing-store round trips.
//!
//! Every relational or key-value call runs inside [`bounded`], so a slow or
//! unreachable store fails the request instead of hanging it. When the
//! deadline elapses the inner future is dropped, which cancels the call.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::AppError;
use crate::result::AppResult;

/// Runs `operation` and fails with [`ErrorKind::Timeout`](crate::error::ErrorKind::Timeout)
/// if it does not finish within `limit`.
pub async fn bounded<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store operation exceeded its deadline"
            );
            Err(AppError::timeout(format!(
                "{operation} did not complete within {}ms",
                limit.as_millis()
            )))
        }
    }
}
