use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RegisterCommand;
use crate::identity::errors::IdentityError;

/// Port for authentication operations exposed to the HTTP layer.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password plus the requested role
    ///
    /// # Returns
    /// Persisted identity
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered, including a concurrent registration
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Signed token carrying the identity's id and role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Storage, hash verification or signing failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, IdentityError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Internal` - Storage failed
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError>;
}

/// Credential store for identities.
///
/// Implementations must enforce email uniqueness atomically at write time.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist new identity to storage.
    ///
    /// # Arguments
    /// * `identity` - Identity to create
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `EmailTaken` - An identity with this email already exists
    /// * `Internal` - Storage operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Storage operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by exact, case-sensitive email match.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
}
