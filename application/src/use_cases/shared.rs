//! Shared utilities for use cases.
//!
//! Timeout and cancellation wrappers used around every capability call.

use crate::ports::capability::CapabilityError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Await `fut`, giving up after `limit` when one is set.
///
/// Expiry maps to [`CapabilityError::Timeout`]; the inner output is returned
/// untouched otherwise.
pub(crate) async fn with_timeout<F: Future>(
    limit: Option<Duration>,
    fut: F,
) -> Result<F::Output, CapabilityError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| CapabilityError::Timeout(limit)),
        None => Ok(fut.await),
    }
}

/// Await a capability call under an optional timeout, flattening the result.
pub(crate) async fn bounded_call<T, F>(limit: Option<Duration>, fut: F) -> Result<T, CapabilityError>
where
    F: Future<Output = Result<T, CapabilityError>>,
{
    with_timeout(limit, fut).await.and_then(|result| result)
}

/// Race `fut` against `token`.
///
/// Returns `None` when the token fires first; `fut` is dropped in that case.
pub(crate) async fn cancellable<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = fut => Some(output),
    }
}
