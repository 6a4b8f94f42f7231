//! In-memory credential store backend.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{CredentialStore, UserRecord};

/// Default backend: a mutex-guarded map keyed by username.
///
/// Holds the lock only for the duration of a single call; cross-call
/// atomicity lives in the engine.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserRecord>> {
        // A poisoned lock still holds valid records; keep serving them.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryStore {
    fn exists(&self, username: &str) -> bool {
        self.records().contains_key(username)
    }

    fn get(&self, username: &str) -> Option<UserRecord> {
        self.records().get(username).cloned()
    }

    fn put(&self, username: &str, record: UserRecord) {
        self.records().insert(username.to_string(), record);
    }
}
