//! User record and validation rules.

use chrono::{DateTime, Utc};
use serde::Serialize;

use marquee_validate::{EMAIL_RX, Validator, matches};

use crate::password::Password;

/// An account holder.
///
/// `password` and `version` never appear in response JSON. `activated` is
/// lifecycle state only; nothing here validates it.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: Password,
    pub activated: bool,
    #[serde(skip)]
    pub version: i32,
}

impl User {
    /// A fresh, not-yet-stored user. The id is assigned at insert time.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            created_at: Utc::now(),
            name: name.into(),
            email: email.into(),
            password: Password::default(),
            activated: false,
            version: 1,
        }
    }
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(
        matches(email, &EMAIL_RX),
        "email",
        "must be a valid email address",
    );
}

pub fn validate_password_plaintext(v: &mut Validator, plaintext: &str) {
    v.check(!plaintext.is_empty(), "password", "must be provided");
    v.check(
        plaintext.len() >= 8,
        "password",
        "must be at least 8 bytes long",
    );
    v.check(
        plaintext.len() <= 72,
        "password",
        "must not be more than 72 bytes long",
    );
}

/// Record every field-level failure for `user` on `v`.
///
/// The plaintext rules only run while the transient plaintext is present,
/// i.e. in the same request that called [`Password::set`].
///
/// # Panics
///
/// Panics if the credential carries no hash. A user reaching validation
/// without one is a bug in the calling code, not bad input, and carrying on
/// would risk persisting an unusable credential.
pub fn validate_user(v: &mut Validator, user: &User) {
    v.check(!user.name.is_empty(), "name", "must be provided");
    v.check(
        user.name.len() <= 500,
        "name",
        "must not be more than 500 bytes long",
    );

    validate_email(v, &user.email);

    if let Some(plaintext) = user.password.plaintext() {
        validate_password_plaintext(v, plaintext);
    }

    if !user.password.has_hash() {
        panic!("missing password hash for user");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("John Doe", "john@example.com");
        user.password.set("validpassword123").unwrap();
        user
    }

    fn validate(user: &User) -> Validator {
        let mut v = Validator::new();
        validate_user(&mut v, user);
        v
    }

    #[test]
    fn valid_user_passes() {
        let v = validate(&sample_user());
        assert!(v.valid(), "unexpected errors: {:?}", v.errors());
    }

    #[test]
    fn empty_name_rejected() {
        let mut user = sample_user();
        user.name = String::new();

        let v = validate(&user);
        assert_eq!(
            v.errors().get("name").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn name_over_500_bytes_rejected() {
        let mut user = sample_user();
        user.name = "x".repeat(501);

        let v = validate(&user);
        assert_eq!(
            v.errors().get("name").map(String::as_str),
            Some("must not be more than 500 bytes long")
        );
    }

    #[test]
    fn name_of_exactly_500_bytes_accepted() {
        let mut user = sample_user();
        user.name = "x".repeat(500);

        assert!(validate(&user).valid());
    }

    #[test]
    fn invalid_email_rejected() {
        let mut user = sample_user();
        user.email = "invalid-email".to_string();

        let v = validate(&user);
        assert_eq!(
            v.errors().get("email").map(String::as_str),
            Some("must be a valid email address")
        );
    }

    #[test]
    fn empty_email_rejected() {
        let mut user = sample_user();
        user.email = String::new();

        let v = validate(&user);
        assert_eq!(
            v.errors().get("email").map(String::as_str),
            Some("must be provided")
        );
    }

    #[test]
    fn short_plaintext_rejected() {
        let mut user = sample_user();
        user.password.set("2short!").unwrap();

        let v = validate(&user);
        assert_eq!(
            v.errors().get("password").map(String::as_str),
            Some("must be at least 8 bytes long")
        );
    }

    #[test]
    fn long_plaintext_rejected() {
        let mut user = sample_user();
        user.password.set(&"p".repeat(73)).unwrap();

        let v = validate(&user);
        assert_eq!(
            v.errors().get("password").map(String::as_str),
            Some("must not be more than 72 bytes long")
        );
    }

    #[test]
    fn plaintext_length_bounds_are_inclusive() {
        let mut user = sample_user();

        user.password.set(&"p".repeat(8)).unwrap();
        assert!(validate(&user).valid());

        user.password.set(&"p".repeat(72)).unwrap();
        assert!(validate(&user).valid());
    }

    #[test]
    fn stored_user_without_plaintext_skips_password_rules() {
        // A user rebuilt from storage has a hash but no plaintext; length
        // rules must not fire against an absent plaintext.
        let mut user = User::new("Jane Doe", "jane@example.com");
        user.password = Password::from_hash(
            "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW",
        );

        assert!(validate(&user).valid());
    }

    #[test]
    #[should_panic(expected = "missing password hash for user")]
    fn missing_hash_is_a_fatal_precondition_violation() {
        let user = User::new("John Doe", "john@example.com");
        let mut v = Validator::new();
        validate_user(&mut v, &user);
    }

    #[test]
    fn user_json_excludes_password_and_version() {
        let value = serde_json::to_value(sample_user()).unwrap();

        assert!(value.get("password").is_none());
        assert!(value.get("version").is_none());
        assert_eq!(value["name"], "John Doe");
        assert_eq!(value["email"], "john@example.com");
        assert_eq!(value["activated"], false);
        assert!(value.get("created_at").is_some());
    }
}
