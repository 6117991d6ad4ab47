//! Route table.
//!
//! Each route registers a method fallback so an unsupported verb earns a
//! JSON 405 instead of the framework default.

use axum::Router;
use axum::routing::{get, post};

use crate::app::errors;

pub mod movies;
pub mod system;
pub mod tokens;
pub mod users;

pub fn router() -> Router {
    Router::new()
        .route(
            "/v1/healthcheck",
            get(system::healthcheck).fallback(errors::method_not_allowed),
        )
        .nest("/v1/movies", movies::router())
        .route(
            "/v1/users",
            post(users::register_user).fallback(errors::method_not_allowed),
        )
        .route(
            "/v1/tokens/authentication",
            post(tokens::create_authentication_token).fallback(errors::method_not_allowed),
        )
        .route(
            "/debug/vars",
            get(system::debug_vars).fallback(errors::method_not_allowed),
        )
}
