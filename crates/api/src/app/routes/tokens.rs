//! Authentication token issuance.

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use marquee_accounts::{validate_email, validate_password_plaintext};
use marquee_validate::Validator;

use crate::app::{dto, errors};
use crate::app::state::AppState;

/// Bearer token handed out on successful authentication. Nothing holds on
/// to it server-side, so possession is currently the whole story.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationToken {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl AuthenticationToken {
    fn issue() -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            expiry: Utc::now() + chrono::Duration::hours(24),
        }
    }
}

pub async fn create_authentication_token(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Result<Json<dto::CreateTokenRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_request_response(rejection.body_text()),
    };

    // Shape checks first. A request that could never authenticate gets a 422
    // naming the fields, not a 401.
    let mut v = Validator::new();
    validate_email(&mut v, &body.email);
    validate_password_plaintext(&mut v, &body.password);
    if !v.valid() {
        return errors::failed_validation_response(v.into_errors());
    }

    let Some(user) = state.users.get(&body.email) else {
        return errors::invalid_credentials_response();
    };

    match user.password.matches(&body.password) {
        Ok(true) => {}
        Ok(false) => return errors::invalid_credentials_response(),
        Err(err) => return errors::server_error_response(&state, &method, &uri, &err),
    }

    let token = AuthenticationToken::issue();
    (
        StatusCode::CREATED,
        Json(json!({ "authentication_token": token })),
    )
        .into_response()
}
