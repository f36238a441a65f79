use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Error for role parsing failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Authorization role carried by every identity and every session token.
///
/// The set is closed: tokens whose `role` claim is not one of these values
/// fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Every role recognised by the system.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// Get role as its wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Resolve a requested role, falling back to [`Role::User`].
    ///
    /// Absent or unrecognised values are coerced rather than rejected.
    ///
    /// # Arguments
    /// * `requested` - Raw role name supplied by the caller, if any
    ///
    /// # Returns
    /// The matching role, or `Role::User`
    pub fn parse_or_default(requested: Option<&str>) -> Self {
        requested
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
