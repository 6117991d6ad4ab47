//! `marquee-catalog` — the movie catalog domain.
//!
//! Holds the [`Movie`] record, its `"<n> mins"` runtime wire type and the
//! field-level validation rules. No storage and no HTTP in here.

pub mod movie;

pub use movie::{Movie, Runtime, validate_movie};
