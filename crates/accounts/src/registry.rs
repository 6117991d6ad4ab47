//! Process-lifetime user registry.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate email")]
    DuplicateEmail,
}

/// In-memory users keyed by email, compared case-insensitively.
///
/// Not a persistence layer: contents live and die with the process. It is
/// here so the duplicate-email invariant and the authentication comparison
/// run against real stored records instead of placeholders.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<String, User>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `user` under its email, assigning the next id.
    ///
    /// Returns the stored copy with the id filled in, or
    /// [`RegistryError::DuplicateEmail`] if the email is already taken.
    pub fn insert(&self, mut user: User) -> Result<User, RegistryError> {
        // A poisoned lock still holds a usable map; nothing in the guarded
        // sections can panic mid-mutation.
        let mut users = self
            .users
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let key = user.email.to_lowercase();
        if users.contains_key(&key) {
            return Err(RegistryError::DuplicateEmail);
        }

        user.id = users.len() as i64 + 1;
        users.insert(key, user.clone());
        Ok(user)
    }

    pub fn get(&self, email: &str) -> Option<User> {
        let users = self
            .users
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        users.get(&email.to_lowercase()).cloned()
    }
}
