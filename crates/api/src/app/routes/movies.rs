//! Movie endpoints.
//!
//! No datastore sits behind these yet: reads hand back a canned record,
//! writes validate their input and echo the would-be result. The
//! request/response contract is the part that is final.

use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde_json::json;

use marquee_catalog::{Movie, Runtime, validate_movie};
use marquee_validate::Validator;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            post(create_movie)
                .get(list_movies)
                .fallback(errors::method_not_allowed),
        )
        .route(
            "/:id",
            get(show_movie)
                .patch(update_movie)
                .delete(delete_movie)
                .fallback(errors::method_not_allowed),
        )
}

/// The record every read path hands back.
fn sample_movie(id: i64) -> Movie {
    Movie {
        id,
        created_at: Utc::now(),
        title: "SpiderMan".to_string(),
        year: 2002,
        runtime: Runtime(102),
        genres: vec!["drama".to_string(), "action".to_string()],
        version: 1,
    }
}

fn sample_movies() -> Vec<Movie> {
    vec![
        sample_movie(1),
        Movie {
            id: 2,
            created_at: Utc::now(),
            title: "Black Panther".to_string(),
            year: 2018,
            runtime: Runtime(134),
            genres: vec!["action".to_string(), "adventure".to_string()],
            version: 1,
        },
        Movie {
            id: 3,
            created_at: Utc::now(),
            title: "The Breakfast Club".to_string(),
            year: 1986,
            runtime: Runtime(96),
            genres: vec!["drama".to_string()],
            version: 1,
        },
    ]
}

/// Positive integer or nothing. Anything else in the path segment is
/// indistinguishable from a missing resource.
fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1)
}

pub async fn create_movie(body: Result<Json<dto::CreateMovieRequest>, JsonRejection>) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_request_response(rejection.body_text()),
    };

    let movie = Movie {
        id: 1,
        created_at: Utc::now(),
        title: body.title,
        year: body.year,
        runtime: body.runtime.unwrap_or(Runtime(0)),
        genres: body.genres,
        version: 1,
    };

    let mut v = Validator::new();
    validate_movie(&mut v, &movie, Utc::now());
    if !v.valid() {
        return errors::failed_validation_response(v.into_errors());
    }

    (StatusCode::CREATED, Json(json!({ "movie": movie }))).into_response()
}

pub async fn list_movies() -> Response {
    (StatusCode::OK, Json(json!({ "movies": sample_movies() }))).into_response()
}

pub async fn show_movie(Path(id): Path<String>) -> Response {
    let Some(id) = parse_id(&id) else {
        return errors::not_found_response();
    };

    (StatusCode::OK, Json(json!({ "movie": sample_movie(id) }))).into_response()
}

pub async fn update_movie(
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateMovieRequest>, JsonRejection>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return errors::not_found_response();
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_request_response(rejection.body_text()),
    };

    let mut movie = sample_movie(id);
    if let Some(title) = body.title {
        movie.title = title;
    }
    if let Some(year) = body.year {
        movie.year = year;
    }
    if let Some(runtime) = body.runtime {
        movie.runtime = runtime;
    }
    if let Some(genres) = body.genres {
        movie.genres = genres;
    }

    let mut v = Validator::new();
    validate_movie(&mut v, &movie, Utc::now());
    if !v.valid() {
        return errors::failed_validation_response(v.into_errors());
    }

    movie.version += 1;
    (StatusCode::OK, Json(json!({ "movie": movie }))).into_response()
}

pub async fn delete_movie(Path(id): Path<String>) -> Response {
    if parse_id(&id).is_none() {
        return errors::not_found_response();
    }

    (
        StatusCode::OK,
        Json(json!({ "message": "movie successfully deleted" })),
    )
        .into_response()
}
