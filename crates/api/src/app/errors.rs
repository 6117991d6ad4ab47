//! Canned JSON error responses.
//!
//! Every error leaves the API as `{"error": ...}` where the payload is
//! either a single message string or, for validation failures, a map of
//! field names to failure messages.

use std::collections::HashMap;

use axum::Json;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::app::state::AppState;

fn error_response(status: StatusCode, message: serde_json::Value) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Router-level fallback for paths that match nothing.
pub async fn not_found() -> Response {
    not_found_response()
}

pub fn not_found_response() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        json!("the requested resource could not be found"),
    )
}

/// Method-level fallback for routes that exist under other verbs.
pub async fn method_not_allowed(method: Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        json!(format!(
            "the {method} method is not supported for this resource"
        )),
    )
}

pub fn bad_request_response(message: String) -> Response {
    error_response(StatusCode::BAD_REQUEST, json!(message))
}

/// 422 carrying the field-to-message map accumulated by a validator.
pub fn failed_validation_response(errors: HashMap<String, String>) -> Response {
    error_response(StatusCode::UNPROCESSABLE_ENTITY, json!(errors))
}

pub fn invalid_credentials_response() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        json!("invalid authentication credentials"),
    )
}

/// Log the fault together with the request that triggered it, then answer
/// with the generic 500 body. The underlying error never reaches the client.
pub fn server_error_response(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    err: &dyn std::error::Error,
) -> Response {
    let properties = HashMap::from([
        ("request_method".to_string(), method.to_string()),
        ("request_url".to_string(), uri.to_string()),
    ]);
    state.logger.print_error(err, Some(properties));

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!("the server encountered a problem and could not process your request"),
    )
}
