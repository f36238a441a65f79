use auth::Role;

use crate::domain::identity::models::IdentityId;

/// Authenticated caller attached to admitted requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub identity_id: IdentityId,
    pub role: Role,
}
