//! User registration.

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use marquee_accounts::{RegistryError, User, validate_user};
use marquee_validate::Validator;

use crate::app::{dto, errors};
use crate::app::state::AppState;

pub async fn register_user(
    Extension(state): Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Result<Json<dto::RegisterUserRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_request_response(rejection.body_text()),
    };

    let mut user = User::new(body.name, body.email);
    if let Err(err) = user.password.set(&body.password) {
        return errors::server_error_response(&state, &method, &uri, &err);
    }

    let mut v = Validator::new();
    validate_user(&mut v, &user);
    if !v.valid() {
        return errors::failed_validation_response(v.into_errors());
    }

    let user = match state.users.insert(user) {
        Ok(user) => user,
        Err(RegistryError::DuplicateEmail) => {
            v.add_error("email", "a user with this email address already exists");
            return errors::failed_validation_response(v.into_errors());
        }
    };

    (StatusCode::CREATED, Json(json!({ "user": user }))).into_response()
}
