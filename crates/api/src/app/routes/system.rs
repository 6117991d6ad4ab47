//! Healthcheck and debug endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::VERSION;
use crate::app::state::AppState;

pub async fn healthcheck(Extension(state): Extension<Arc<AppState>>) -> Response {
    let body = json!({
        "status": "available",
        "system_info": {
            "environment": state.config.env,
            "version": VERSION,
        },
    });

    (StatusCode::OK, Json(body)).into_response()
}

/// Request counters plus build info, in the spirit of an expvar page.
pub async fn debug_vars(Extension(state): Extension<Arc<AppState>>) -> Response {
    let snapshot = state.metrics.snapshot();
    let body = json!({
        "environment": state.config.env,
        "version": VERSION,
        "total_requests_received": snapshot.total_requests_received,
        "total_responses_sent": snapshot.total_responses_sent,
        "total_processing_time_us": snapshot.total_processing_time_us,
    });

    (StatusCode::OK, Json(body)).into_response()
}
