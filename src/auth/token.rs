//! Session and CSRF token generation and comparison.

use anyhow::{Context, Result};
use base64::Engine;
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Entropy per token before encoding.
const TOKEN_BYTES: usize = 32;

/// Generate a fresh random token: 32 bytes from the OS RNG, base64
/// url-safe without padding.
pub fn generate_token() -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate token")?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}

/// Compare a presented token against the stored one.
///
/// Both sides are hashed and the digests compared, so neither the match
/// position nor the token length shows up in timing. Empty presented
/// values never match, even against an empty stored token (logged out).
#[must_use]
pub fn tokens_match(presented: &str, stored: &str) -> bool {
    if presented.is_empty() || stored.is_empty() {
        return false;
    }
    digest(presented) == digest(stored)
}

fn digest(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}
