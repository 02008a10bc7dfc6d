//! Authentication error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while authenticating a request.
///
/// All variants except `Unavailable` map to an unauthorized response;
/// none of them is ever retried automatically and none leaves partial
/// side effects.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer credential was presented.
    #[error("authorization header with bearer token is required")]
    NoToken,

    /// The credential is malformed or its signature does not verify.
    #[error("invalid or malformed token")]
    InvalidToken,

    /// The credential's expiry has passed.
    #[error("token has expired")]
    ExpiredToken,

    /// The token's user id does not resolve to an identity record.
    #[error("unknown user: {0}")]
    UnknownUser(Uuid),

    /// The identity store is unreachable.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "token_expired",
            Self::UnknownUser(_) => "unknown_user",
            Self::Unavailable(_) => "store_unavailable",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoToken | Self::InvalidToken | Self::ExpiredToken | Self::UnknownUser(_) => 401,
            Self::Unavailable(_) => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failures_are_unauthorized() {
        assert_eq!(AuthError::NoToken.http_status_code(), 401);
        assert_eq!(AuthError::InvalidToken.http_status_code(), 401);
        assert_eq!(AuthError::ExpiredToken.http_status_code(), 401);
        assert_eq!(AuthError::UnknownUser(Uuid::nil()).http_status_code(), 401);
        assert_eq!(
            AuthError::Unavailable("timeout".to_string()).http_status_code(),
            503
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::NoToken.error_code(), "missing_token");
        assert_eq!(AuthError::InvalidToken.error_code(), "invalid_token");
        assert_eq!(AuthError::ExpiredToken.error_code(), "token_expired");
        assert_eq!(AuthError::UnknownUser(Uuid::nil()).error_code(), "unknown_user");
    }
}
