//! Auth error taxonomy and its HTTP mapping.

use axum::{http::StatusCode, response::IntoResponse};
use std::fmt;

/// Terminal, user-visible auth failures. Mapped 1:1 to status codes and
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Registration fields failed validation.
    InvalidInput,
    /// Username already registered.
    Conflict,
    /// Any credential, session, or CSRF mismatch. Deliberately carries no
    /// detail about which check failed.
    Unauthorized,
    /// Wrong HTTP verb for the route.
    MethodNotAllowed,
    /// Hashing or entropy failure. Nothing user-actionable; details go to
    /// the log, not the response.
    Internal,
}

impl Error {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::NOT_ACCEPTABLE,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidInput => "Invalid username or password",
            Self::Conflict => "Username already taken",
            Self::Unauthorized => "Unauthorized",
            Self::MethodNotAllowed => "Method not allowed",
            Self::Internal => "Internal server error",
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_contract() {
        assert_eq!(Error::InvalidInput.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(Error::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn unauthorized_message_is_generic() {
        // One message for every auth failure, nothing to fingerprint.
        assert_eq!(Error::Unauthorized.to_string(), "Unauthorized");
    }
}
