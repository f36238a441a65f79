use std::sync::Arc;

use auth::Claims;
use auth::Role;
use auth::TokenService;

use crate::domain::authorization::errors::AuthorizationError;
use crate::domain::authorization::models::Principal;
use crate::domain::identity::models::IdentityId;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer-token gate parameterized by the roles it admits.
///
/// An empty role set admits any authenticated caller. Cloning is cheap, so one
/// gate per protected route group can be handed to the HTTP middleware.
#[derive(Clone)]
pub struct AuthorizationGate {
    token_service: Arc<TokenService>,
    required_roles: Arc<[Role]>,
}

impl AuthorizationGate {
    /// Create a gate admitting only the given roles.
    ///
    /// # Arguments
    /// * `token_service` - Validates presented tokens
    /// * `required_roles` - Admitted roles; empty means any authenticated role
    pub fn new(
        token_service: Arc<TokenService>,
        required_roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            token_service,
            required_roles: required_roles.into_iter().collect(),
        }
    }

    /// Create a gate admitting any authenticated caller.
    pub fn authenticated(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, std::iter::empty())
    }

    /// Validate an `Authorization` header value and return the token claims.
    ///
    /// Role membership is not checked.
    ///
    /// # Errors
    /// * `MissingAuth` - No header was sent
    /// * `MalformedAuth` - Header does not use the `Bearer ` scheme or carries no token
    /// * `InvalidToken` - Token is expired, forged or unparseable
    pub fn validate_bearer(&self, header: Option<&str>) -> Result<Claims, AuthorizationError> {
        let header = header.ok_or(AuthorizationError::MissingAuth)?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.is_empty())
            .ok_or(AuthorizationError::MalformedAuth)?;

        self.token_service.validate(token).map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            AuthorizationError::InvalidToken
        })
    }

    /// Admit or reject a request given its `Authorization` header value.
    ///
    /// # Returns
    /// Principal built from the token's subject and role
    ///
    /// # Errors
    /// * `MissingAuth`, `MalformedAuth`, `InvalidToken` - See [`Self::validate_bearer`]
    /// * `Forbidden` - Token role is not in the required set
    pub fn admit(&self, header: Option<&str>) -> Result<Principal, AuthorizationError> {
        let claims = self.validate_bearer(header)?;

        let identity_id = IdentityId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not an identity ID");
            AuthorizationError::InvalidToken
        })?;

        if !self.required_roles.is_empty() && !self.required_roles.contains(&claims.role) {
            tracing::warn!(
                identity_id = %identity_id,
                role = %claims.role,
                "Role not permitted"
            );
            return Err(AuthorizationError::Forbidden);
        }

        Ok(Principal {
            identity_id,
            role: claims.role,
        })
    }
}
