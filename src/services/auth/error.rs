//! Authorization failures.
//!
//! Every variant is terminal for the request: nothing here is retried by the caller.
//! The HTTP mapping lives in `crate::error`.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,
    #[error("authorization header must be of the form 'Bearer <token>'")]
    MalformedHeader,
    #[error("unable to parse authentication token")]
    InvalidHeader,
    #[error("unable to find an appropriate signing key")]
    InvalidKey,
    #[error("token expired")]
    TokenExpired,
    #[error("incorrect claims, check the audience and issuer")]
    InvalidClaims,
    #[error("permissions not included in token")]
    Unauthorized,
    #[error("permission not found")]
    Forbidden,
    #[error("signing keys are currently unavailable")]
    KeyFetchFailed,
}

impl AuthError {
    /// Stable machine-readable code, surfaced in error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::InvalidHeader => "invalid_header",
            Self::InvalidKey => "invalid_key",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::KeyFetchFailed => "key_fetch_failed",
        }
    }

    /// `true` when the caller is authenticated but lacks the permission.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden)
    }
}
