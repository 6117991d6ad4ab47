//! `marquee-metrics` — Graphite plaintext-protocol push client.
//!
//! Writes `<prefix>.<name> <value> <unix_ts>\n` lines over a single TCP
//! connection. This is an external collaborator: callers log or ignore its
//! errors, it never takes the process down.

pub mod client;

pub use client::{Client, MetricsError};
