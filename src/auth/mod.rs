//! Auth protocol engine: register, login, logout, and per-request
//! authorization against the credential store.

use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::store::{SharedStore, UserRecord};

pub mod cookies;
mod error;
pub mod password;
pub mod token;

pub use error::Error;

/// Minimum length for both registration fields.
const MIN_FIELD_LENGTH: usize = 8;

/// Freshly issued session/CSRF pair, returned once at login so the
/// transport can set the cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub session: String,
    pub csrf: String,
}

/// Presented credentials for an authorized request: the `session_token`
/// cookie value and the `X-CSRF-Token` header value, when the request
/// carried them.
#[derive(Debug, Default, Clone)]
pub struct RequestTokens {
    pub session: Option<String>,
    pub csrf: Option<String>,
}

/// Protocol engine over an injected credential store.
///
/// Every operation ends in a read-modify-write against shared state;
/// `gate` serializes those critical sections so concurrent logins,
/// logouts, or registrations for the same username cannot overwrite
/// each other with stale records. Password hashing happens before the
/// gate is taken, on a blocking thread.
pub struct AuthEngine {
    store: SharedStore,
    gate: Mutex<()>,
}

impl AuthEngine {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            gate: Mutex::new(()),
        }
    }

    /// Create a user record with a salted password hash and no session.
    ///
    /// # Errors
    /// `InvalidInput` when either field is shorter than 8 characters,
    /// `Conflict` when the username is taken.
    pub async fn register(&self, username: &str, password: SecretString) -> Result<(), Error> {
        use secrecy::ExposeSecret;

        if username.len() < MIN_FIELD_LENGTH || password.expose_secret().len() < MIN_FIELD_LENGTH {
            return Err(Error::InvalidInput);
        }

        if self.store.exists(username) {
            return Err(Error::Conflict);
        }

        // Argon2 burns real CPU; keep it on a blocking thread and outside
        // the gate so other operations are not serialized behind it.
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|err| {
                error!("Hashing task failed: {err}");
                Error::Internal
            })?
            .map_err(|err| {
                error!("Failed to hash password: {err}");
                Error::Internal
            })?;

        let _guard = self.gate.lock().await;

        // A concurrent registration may have won while hashing.
        if self.store.exists(username) {
            return Err(Error::Conflict);
        }

        self.store
            .put(username, UserRecord::new(username.to_string(), hash));
        debug!(username, "registered");

        Ok(())
    }

    /// Verify credentials and issue a fresh session/CSRF token pair.
    ///
    /// Every successful login mints new tokens, invalidating whatever the
    /// record held before.
    ///
    /// # Errors
    /// `Unauthorized` for an unknown user or failed password
    /// verification, with no distinction between the two.
    pub async fn login(
        &self,
        username: &str,
        password: SecretString,
    ) -> Result<SessionTokens, Error> {
        // Read-only snapshot; nothing is mutated until the password holds.
        let Some(record) = self.store.get(username) else {
            return Err(Error::Unauthorized);
        };

        let stored_hash = record.password_hash;
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &stored_hash))
                .await
                .map_err(|err| {
                    error!("Verification task failed: {err}");
                    Error::Internal
                })?;
        if !verified {
            return Err(Error::Unauthorized);
        }

        let tokens = SessionTokens {
            session: token::generate_token().map_err(|err| {
                error!("Failed to generate session token: {err}");
                Error::Internal
            })?,
            csrf: token::generate_token().map_err(|err| {
                error!("Failed to generate CSRF token: {err}");
                Error::Internal
            })?,
        };

        let _guard = self.gate.lock().await;

        // Re-read under the gate so a login racing another login or
        // logout never writes back a stale record.
        let Some(mut record) = self.store.get(username) else {
            return Err(Error::Unauthorized);
        };
        record.session_token = tokens.session.clone();
        record.csrf_token = tokens.csrf.clone();
        self.store.put(username, record);
        debug!(username, "session established");

        Ok(tokens)
    }

    /// Validate a request's session cookie and CSRF header against the
    /// stored pair.
    ///
    /// Checks in order, failing fast: record exists, session cookie
    /// matches, CSRF header matches. Every failure is the same
    /// `Unauthorized`.
    ///
    /// # Errors
    /// `Unauthorized` on any violated check.
    pub async fn authorize(&self, username: &str, presented: &RequestTokens) -> Result<(), Error> {
        let _guard = self.gate.lock().await;
        self.authorize_locked(username, presented)
    }

    /// End the session: authorize the request, then clear both tokens.
    ///
    /// # Errors
    /// `Unauthorized` when the request does not authorize.
    pub async fn logout(&self, username: &str, presented: &RequestTokens) -> Result<(), Error> {
        let _guard = self.gate.lock().await;

        self.authorize_locked(username, presented)?;

        // authorize_locked proved the record exists.
        let Some(mut record) = self.store.get(username) else {
            return Err(Error::Unauthorized);
        };
        record.session_token.clear();
        record.csrf_token.clear();
        self.store.put(username, record);
        debug!(username, "session cleared");

        Ok(())
    }

    fn authorize_locked(&self, username: &str, presented: &RequestTokens) -> Result<(), Error> {
        let Some(record) = self.store.get(username) else {
            return Err(Error::Unauthorized);
        };

        let session = presented.session.as_deref().unwrap_or_default();
        if !token::tokens_match(session, &record.session_token) {
            return Err(Error::Unauthorized);
        }

        let csrf = presented.csrf.as_deref().unwrap_or_default();
        if !token::tokens_match(csrf, &record.csrf_token) {
            return Err(Error::Unauthorized);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn engine() -> AuthEngine {
        AuthEngine::new(Arc::new(MemoryStore::new()))
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value)
    }

    async fn registered_engine() -> AuthEngine {
        let engine = engine();
        engine
            .register("alice1234", secret("password1"))
            .await
            .unwrap();
        engine
    }

    #[tokio::test]
    async fn register_rejects_short_fields() {
        let engine = engine();
        assert_eq!(
            engine.register("short", secret("password1")).await,
            Err(Error::InvalidInput)
        );
        assert_eq!(
            engine.register("alice1234", secret("short")).await,
            Err(Error::InvalidInput)
        );
        // Neither attempt may leave a record behind.
        assert_eq!(
            engine.login("short", secret("password1")).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let engine = registered_engine().await;
        assert_eq!(
            engine.register("alice1234", secret("password2")).await,
            Err(Error::Conflict)
        );
    }

    #[tokio::test]
    async fn login_issues_fresh_distinct_tokens() {
        let engine = registered_engine().await;

        let first = engine
            .login("alice1234", secret("password1"))
            .await
            .unwrap();
        assert!(!first.session.is_empty());
        assert!(!first.csrf.is_empty());
        assert_ne!(first.session, first.csrf);

        let second = engine
            .login("alice1234", secret("password1"))
            .await
            .unwrap();
        assert_ne!(first.session, second.session);
        assert_ne!(first.csrf, second.csrf);
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let engine = registered_engine().await;
        assert_eq!(
            engine.login("alice1234", secret("password2")).await,
            Err(Error::Unauthorized)
        );
        assert_eq!(
            engine.login("nobody12", secret("whatever1")).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn failed_login_leaves_record_untouched() {
        let engine = registered_engine().await;
        let tokens = engine
            .login("alice1234", secret("password1"))
            .await
            .unwrap();

        assert_eq!(
            engine.login("alice1234", secret("password2")).await,
            Err(Error::Unauthorized)
        );

        // The rejected attempt must not have touched the stored pair.
        let presented = RequestTokens {
            session: Some(tokens.session),
            csrf: Some(tokens.csrf),
        };
        assert_eq!(engine.authorize("alice1234", &presented).await, Ok(()));
    }

    #[tokio::test]
    async fn authorize_requires_both_tokens_exact() {
        let engine = registered_engine().await;
        let tokens = engine
            .login("alice1234", secret("password1"))
            .await
            .unwrap();

        let good = RequestTokens {
            session: Some(tokens.session.clone()),
            csrf: Some(tokens.csrf.clone()),
        };
        assert_eq!(engine.authorize("alice1234", &good).await, Ok(()));

        let tampered_session = RequestTokens {
            session: Some(format!("{}x", tokens.session)),
            csrf: Some(tokens.csrf.clone()),
        };
        assert_eq!(
            engine.authorize("alice1234", &tampered_session).await,
            Err(Error::Unauthorized)
        );

        let tampered_csrf = RequestTokens {
            session: Some(tokens.session.clone()),
            csrf: Some(format!("{}x", tokens.csrf)),
        };
        assert_eq!(
            engine.authorize("alice1234", &tampered_csrf).await,
            Err(Error::Unauthorized)
        );

        let missing = RequestTokens::default();
        assert_eq!(
            engine.authorize("alice1234", &missing).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn authorize_unknown_user_fails() {
        let engine = engine();
        let presented = RequestTokens {
            session: Some("token".to_string()),
            csrf: Some("token".to_string()),
        };
        assert_eq!(
            engine.authorize("nobody12", &presented).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn logout_invalidates_session() {
        let engine = registered_engine().await;
        let tokens = engine
            .login("alice1234", secret("password1"))
            .await
            .unwrap();

        let presented = RequestTokens {
            session: Some(tokens.session.clone()),
            csrf: Some(tokens.csrf.clone()),
        };

        assert_eq!(engine.logout("alice1234", &presented).await, Ok(()));

        // Replay with the old pair must fail once tokens are cleared.
        assert_eq!(
            engine.authorize("alice1234", &presented).await,
            Err(Error::Unauthorized)
        );
        assert_eq!(
            engine.logout("alice1234", &presented).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn logout_without_session_fails() {
        let engine = registered_engine().await;
        let presented = RequestTokens {
            session: Some("stale".to_string()),
            csrf: Some("stale".to_string()),
        };
        assert_eq!(
            engine.logout("alice1234", &presented).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn logged_out_record_never_authorizes_empty_pair() {
        let engine = registered_engine().await;
        // Record exists with empty tokens; an empty presentation must not
        // match them.
        let presented = RequestTokens {
            session: Some(String::new()),
            csrf: Some(String::new()),
        };
        assert_eq!(
            engine.authorize("alice1234", &presented).await,
            Err(Error::Unauthorized)
        );
    }

    #[tokio::test]
    async fn concurrent_registrations_yield_one_winner() {
        let engine = Arc::new(engine());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine.register("alice1234", secret("password1")).await
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => created += 1,
                Err(Error::Conflict) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
    }
}
