//! HTTP surface of the Marquee API: configuration, routing, middleware and
//! the request/response mapping for every endpoint.

pub mod app;
pub mod config;
pub mod middleware;

/// Version string reported by the healthcheck and `/debug/vars`.
pub const VERSION: &str = "1.0.0";
