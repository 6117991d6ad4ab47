//! `marquee-accounts` — users and their password credentials.
//!
//! The [`Password`] value type pairs an optional transient plaintext with a
//! bcrypt hash; [`validate_user`] applies the field rules and enforces the
//! hash-presence precondition; [`UserRegistry`] is the process-lifetime
//! store that gives duplicate-email detection something to bite on.

pub mod password;
pub mod registry;
pub mod user;

pub use password::{Password, PasswordError};
pub use registry::{RegistryError, UserRegistry};
pub use user::{User, validate_email, validate_password_plaintext, validate_user};
