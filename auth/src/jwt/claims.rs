use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::roles::Role;

/// Session token claims.
///
/// Standard RFC 7519 `sub`, `iat`, `exp` and `iss` claims plus the subject's
/// role. All fields are mandatory: a token missing any of them does not decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Role granted to the subject when the token was issued
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for a subject, valid for `lifetime` from `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Unique identity identifier
    /// * `role` - Role of the identity
    /// * `issued_at` - Issue instant
    /// * `lifetime` - How long the token stays valid
    /// * `issuer` - Issuer name embedded in `iss`
    pub fn new(
        subject: impl ToString,
        role: Role,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: impl ToString,
    ) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: subject.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
