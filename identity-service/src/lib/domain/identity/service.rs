use std::sync::Arc;

use async_trait::async_trait;
use auth::IssuedToken;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenService;
use chrono::Utc;

use crate::domain::identity::models::DisplayName;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::RegisterCommand;
use crate::identity::errors::IdentityError;
use crate::identity::ports::AuthenticationServicePort;
use crate::identity::ports::IdentityRepository;

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-logins";

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthenticationServicePort with dependency injection.
pub struct AuthenticationService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    /// Verified against when a login email is unknown, so both rejections cost one Argon2 run
    dummy_hash: Option<String>,
}

impl<IR> AuthenticationService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_service` - Session token issuer, shared with the authorization gate
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<IR>, token_service: Arc<TokenService>) -> Self {
        let password_hasher = PasswordHasher::new();

        let dummy_hash = password_hasher
            .hash(DUMMY_PASSWORD)
            .map_err(|e| tracing::warn!(error = %e, "Dummy password hash unavailable"))
            .ok();

        Self {
            repository,
            token_service,
            password_hasher,
            dummy_hash,
        }
    }

    /// Provision an administrator unless the email is already registered.
    ///
    /// Used at startup to seed the first admin account. An existing identity
    /// with the same email is left untouched, whatever its role.
    pub async fn ensure_admin(
        &self,
        name: DisplayName,
        email: EmailAddress,
        password: Password,
    ) -> Result<(), IdentityError> {
        match self.create_identity(name, email, password, Role::Admin).await {
            Ok(identity) => {
                tracing::info!(identity_id = %identity.id, "Bootstrap administrator created");
                Ok(())
            }
            Err(IdentityError::EmailTaken) => {
                tracing::info!("Bootstrap administrator already provisioned");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn create_identity(
        &self,
        name: DisplayName,
        email: EmailAddress,
        password: Password,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailTaken);
        }

        let password_hash = self.hash_password(password).await?;

        let identity = Identity {
            id: IdentityId::new(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        // The store's unique constraint settles concurrent registrations.
        self.repository.create(identity).await
    }

    async fn hash_password(&self, password: Password) -> Result<String, IdentityError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| IdentityError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| IdentityError::Internal(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, IdentityError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| {
                IdentityError::Internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(|e| IdentityError::Internal(e.to_string()))
    }

    async fn burn_verification(&self, password: String) {
        if let Some(dummy_hash) = self.dummy_hash.clone() {
            // Outcome is irrelevant; only the elapsed time matters.
            let _ = self.verify_password(password, dummy_hash).await;
        }
    }
}

#[async_trait]
impl<IR> AuthenticationServicePort for AuthenticationService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        let role = Role::parse_or_default(command.requested_role.as_deref());

        let identity = self
            .create_identity(command.name, command.email, command.password, role)
            .await?;

        tracing::info!(
            identity_id = %identity.id,
            role = %identity.role,
            "Identity registered"
        );

        Ok(identity)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, IdentityError> {
        let Some(identity) = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
        else {
            self.burn_verification(command.password).await;
            tracing::warn!("Login rejected: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let is_valid = self
            .verify_password(command.password, identity.password_hash.clone())
            .await?;

        if !is_valid {
            tracing::warn!(identity_id = %identity.id, "Login rejected: wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let issued = self
            .token_service
            .issue(identity.id, identity.role)
            .map_err(|e| IdentityError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(
            identity_id = %identity.id,
            role = %identity.role,
            "Session token issued"
        );

        Ok(issued)
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }
}
