//! Task-local trace id for the request being served.
//!
//! `RequestTrace` scopes each request future with [`with_trace_id`]; error
//! rendering and security logs read it back with [`trace_id`] without the id
//! being threaded through handler signatures.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// The current request's trace id, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
