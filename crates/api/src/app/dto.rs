//! Request bodies.
//!
//! Unknown keys are rejected at decode time (a 400, mirroring a strict
//! JSON reader). Fields that the validator is responsible for policing
//! default to their zero value when absent, so a missing `title` surfaces
//! as a 422 `"must be provided"` rather than a decode error.

use marquee_catalog::Runtime;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMovieRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    pub runtime: Option<Runtime>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTokenRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
