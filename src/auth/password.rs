//! Password hashing behind a small seam so cost parameters and algorithm
//! choice can change without touching the protocol logic.

use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

/// Hash a password with a fresh random salt, returning the PHC string.
pub fn hash_password(password: &SecretString) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|err| anyhow!(err))
        .context("failed to hash password")?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Verification goes through the Argon2 verifier, never a plaintext
/// comparison; a malformed stored hash verifies as false rather than
/// leaking an error distinct from a wrong password.
pub fn verify_password(password: &SecretString, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_rejects_wrong_password() {
        let password = SecretString::from("password1");
        let hash = hash_password(&password).unwrap();

        assert!(verify_password(&password, &hash));
        assert!(!verify_password(&SecretString::from("password2"), &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let password = SecretString::from("password1");
        let first = hash_password(&password).unwrap();
        let second = hash_password(&password).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn hash_is_phc_formatted() {
        let hash = hash_password(&SecretString::from("password1")).unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password(&SecretString::from("password1"), ""));
        assert!(!verify_password(
            &SecretString::from("password1"),
            "not-a-phc-string"
        ));
    }
}
