//! Application wiring: router construction and the middleware stack.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::http::{HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod state;

use state::AppState;

/// Assemble the full application. `main` serves this; the black-box tests
/// bind it to an ephemeral port.
pub fn build_app(state: Arc<AppState>) -> Router {
    let mut app = routes::router().fallback(errors::not_found);

    if let Some(cors) = cors_layer(&state) {
        app = app.layer(cors);
    }

    // Outermost layers: the counters see every request, preflights included.
    app.layer(
        ServiceBuilder::new()
            .layer(Extension(state.clone()))
            .layer(axum::middleware::from_fn_with_state(
                state,
                middleware::record_metrics,
            )),
    )
}

/// Cross-origin policy from the trusted-origin flags. No origins configured
/// means no CORS headers at all. An origin that does not parse as a header
/// value is logged and skipped.
fn cors_layer(state: &AppState) -> Option<CorsLayer> {
    let trusted = &state.config.cors_trusted_origins;
    if trusted.is_empty() {
        return None;
    }

    let mut origins = Vec::with_capacity(trusted.len());
    for origin in trusted {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(err) => {
                let properties =
                    HashMap::from([("cors_trusted_origin".to_string(), origin.clone())]);
                state.logger.print_error(&err, Some(properties));
            }
        }
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}
