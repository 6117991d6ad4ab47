//! Request middleware.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::app::state::AppState;

/// Counts every request in, every response out, and the wall-clock time
/// spent producing the response.
pub async fn record_metrics(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    state.metrics.record_received();

    let response = next.run(req).await;

    state.metrics.record_sent(started.elapsed());
    response
}
