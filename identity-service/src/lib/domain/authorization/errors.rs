use thiserror::Error;

/// Rejection reasons of the authorization gate
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing Authorization header")]
    MissingAuth,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedAuth,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    Forbidden,
}
