use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningSecret;
use crate::roles::Role;

/// Issuer embedded in, and required from, every session token.
pub const TOKEN_ISSUER: &str = "Auth Service";

/// Session token lifetime.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Session token issuance and validation.
///
/// Tokens are stateless: validity is decided purely by signature, issuer and
/// expiry, so there is no server-side session table and no revocation.
pub struct TokenService {
    jwt_handler: JwtHandler,
    lifetime: Duration,
}

/// Result of a successful token issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed compact JWT
    pub access_token: String,

    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

impl TokenService {
    /// Create a token service issuing 24-hour tokens.
    ///
    /// # Arguments
    /// * `secret` - Signing secret, fixed for the lifetime of the process
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_lifetime(secret, Duration::hours(TOKEN_LIFETIME_HOURS))
    }

    /// Create a token service with a custom token lifetime.
    pub fn with_lifetime(secret: &SigningSecret, lifetime: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret, TOKEN_ISSUER),
            lifetime,
        }
    }

    /// Issue a signed token for a subject, starting now.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier placed in `sub`
    /// * `role` - Identity role placed in `role`
    ///
    /// # Returns
    /// IssuedToken with the compact token and its expiry
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: impl ToString, role: Role) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue a signed token as if it had been created at `issued_at`.
    pub fn issue_at(
        &self,
        subject: impl ToString,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::new(subject, role, issued_at, self.lifetime, TOKEN_ISSUER);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.expires_at(),
        })
    }

    /// Validate a token and return its claims unmodified.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed or lacks required claims
    /// * `InvalidSignature` - Token was signed with another secret
    /// * `Expired` - Token is past its `exp`
    /// * `InvalidIssuer` - Token was issued by someone else
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
