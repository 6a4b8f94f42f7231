//! Cookie names, builders, and extraction for the session/CSRF pair.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE, header::InvalidHeaderValue};

pub const SESSION_COOKIE_NAME: &str = "session_token";
pub const CSRF_COOKIE_NAME: &str = "csrf_token";
/// Out-of-band channel for the CSRF token; must not ride in with cookies.
pub const CSRF_HEADER_NAME: &str = "X-CSRF-Token";

/// Cookie lifetime hint. Sessions are not time-checked server-side; this
/// only bounds how long the browser keeps the pair.
const COOKIE_MAX_AGE_SECONDS: u64 = 24 * 60 * 60;

/// `HttpOnly` cookie carrying the session token.
pub fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={COOKIE_MAX_AGE_SECONDS}"
    ))
}

/// Script-readable cookie carrying the CSRF token, so the client can echo
/// it back in the `X-CSRF-Token` header.
pub fn csrf_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{CSRF_COOKIE_NAME}={token}; Path=/; SameSite=Lax; Max-Age={COOKIE_MAX_AGE_SECONDS}"
    ))
}

/// Immediate-expiry replacement for the session cookie.
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Immediate-expiry replacement for the CSRF cookie.
pub fn clear_csrf_cookie() -> HeaderValue {
    HeaderValue::from_static("csrf_token=; Path=/; SameSite=Lax; Max-Age=0")
}

/// Pull a cookie value out of the request's `Cookie` header.
#[must_use]
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == name {
            return Some(val.to_string());
        }
    }
    None
}

/// Pull the CSRF token out of the `X-CSRF-Token` header.
#[must_use]
pub fn extract_csrf_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
