//! Per-field validation error accumulator and helper predicates.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for syntactically sensible email addresses (RFC-5322-ish).
///
/// Compiled once; callers pass it to [`matches`].
pub static EMAIL_RX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern must compile")
});

/// Accumulator of per-field validation failures.
///
/// Create one per validation call, run the checks, then branch on
/// [`Validator::valid`]. Only the **first** failure for a field is kept:
/// later `add_error` calls for the same field are no-ops, so rule order
/// decides which message the caller sees.
#[derive(Debug, Default)]
pub struct Validator {
    errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no field has a recorded error.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `field`, unless the field already failed.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record a failure iff `ok` is false.
    pub fn check(&mut self, ok: bool, field: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// Field → first failure message.
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> HashMap<String, String> {
        self.errors
    }
}

/// True iff `value` equals one of `list`. An empty list matches nothing.
pub fn in_list<T: PartialEq>(value: &T, list: &[T]) -> bool {
    list.iter().any(|candidate| candidate == value)
}

/// True iff `value` matches the precompiled pattern.
pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True iff no two elements of `values` are equal (empty/singleton ⇒ true).
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|value| seen.insert(value))
}
