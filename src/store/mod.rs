//! Credential store: one record per username.
//!
//! The store is a dumb keyed table. Enforcing the token invariants (both
//! tokens set on login, both cleared on logout) is the engine's job, not
//! the store's.

use std::sync::Arc;

pub mod memory;

pub use memory::MemoryStore;

/// Persisted credential state for a single user.
///
/// `session_token` and `csrf_token` are either both empty (logged out) or
/// both non-empty (logged in).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub session_token: String,
    pub csrf_token: String,
}

impl UserRecord {
    #[must_use]
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            session_token: String::new(),
            csrf_token: String::new(),
        }
    }
}

/// Keyed record storage, object-safe so a persistent backend can replace
/// [`MemoryStore`] without the engine noticing.
///
/// `get`/`put` are not atomic as a pair; callers that read-modify-write
/// must serialize themselves (the engine holds a lock across each
/// operation).
pub trait CredentialStore: Send + Sync {
    fn exists(&self, username: &str) -> bool;
    fn get(&self, username: &str) -> Option<UserRecord>;
    fn put(&self, username: &str, record: UserRecord);
}

/// Shared handle the engine and handlers pass around.
pub type SharedStore = Arc<dyn CredentialStore>;
