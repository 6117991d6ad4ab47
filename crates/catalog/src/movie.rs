//! Movie record and validation rules.

use chrono::{DateTime, Datelike, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use marquee_validate::{Validator, unique};

/// Running time in minutes.
///
/// On the wire this is the string `"<n> mins"`, both ways. Anything else is
/// rejected at decode time with `invalid runtime format`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Runtime(pub i32);

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{} mins", self.0))
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        let minutes = value
            .strip_suffix(" mins")
            .and_then(|n| n.parse::<i32>().ok())
            .ok_or_else(|| de::Error::custom("invalid runtime format"))?;
        Ok(Runtime(minutes))
    }
}

/// A catalog entry.
///
/// `id` and `version` are assigned by whoever hands the record out; nothing
/// in this crate mints them. `created_at` never appears in response JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: i32,
}

/// Record every field-level failure for `movie` on `v`.
///
/// `now` bounds the release year; callers on a live request pass `Utc::now()`,
/// tests pass a fixed instant so the rule stays deterministic.
pub fn validate_movie(v: &mut Validator, movie: &Movie, now: DateTime<Utc>) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= 500,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(movie.year >= 1888, "year", "must be greater than 1888");
    v.check(movie.year <= now.year(), "year", "must not be in the future");

    v.check(movie.runtime.0 != 0, "runtime", "must be provided");
    v.check(movie.runtime.0 > 0, "runtime", "must be a positive integer");

    v.check(
        !movie.genres.is_empty(),
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        movie.genres.len() <= 5,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        movie.genres.iter().all(|genre| !genre.is_empty()),
        "genres",
        "must not contain empty values",
    );
    v.check(
        unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}
