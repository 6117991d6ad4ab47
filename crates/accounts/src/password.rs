//! The password credential value type.

use std::fmt;

use zeroize::Zeroizing;

/// bcrypt work factor. Fixed so every hash carries the same cost; high enough
/// that verification takes a few hundred milliseconds.
pub const HASH_COST: u32 = 12;

/// Faults from the hashing primitive. Neither variant is a user-input
/// problem: a failed hash is an infrastructure fault and a malformed stored
/// hash means the record itself is broken.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[source] bcrypt::BcryptError),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(#[source] bcrypt::BcryptError),
}

/// A user's password state: optional transient plaintext plus the hash.
///
/// The plaintext is only present between [`Password::set`] and the end of the
/// request that called it, so the same-request validation rules can see it;
/// it is zeroized on drop and never leaves this struct. The hash is a
/// self-describing bcrypt string (`$2b$12$…`, salt and cost embedded), so it
/// can be verified later without any external state.
///
/// Neither field is ever serialized; the owning `User` skips this field on
/// every serde path.
#[derive(Clone, Default)]
pub struct Password {
    plaintext: Option<Zeroizing<String>>,
    hash: String,
}

impl Password {
    /// Rebuild a credential from a previously stored hash.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self {
            plaintext: None,
            hash: hash.into(),
        }
    }

    /// Hash `plaintext` and store both it and the resulting hash.
    ///
    /// Errs only when the hashing primitive itself fails; caller maps that to
    /// a 500-class response, not a validation failure.
    pub fn set(&mut self, plaintext: &str) -> Result<(), PasswordError> {
        let hash = bcrypt::hash(plaintext, HASH_COST).map_err(PasswordError::Hash)?;
        self.plaintext = Some(Zeroizing::new(plaintext.to_string()));
        self.hash = hash;
        Ok(())
    }

    /// Verify `candidate` against the stored hash.
    ///
    /// `Ok(false)` is the normal wrong-password outcome. `Err` means the
    /// stored hash could not be read as a bcrypt hash at all.
    pub fn matches(&self, candidate: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(candidate, &self.hash).map_err(PasswordError::MalformedHash)
    }

    /// The transient plaintext, present only right after [`Password::set`].
    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_ref().map(|p| p.as_str())
    }

    pub fn has_hash(&self) -> bool {
        !self.hash.is_empty()
    }
}

impl fmt::Debug for Password {
    // Never echo the plaintext or the hash.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password").finish_non_exhaustive()
    }
}
