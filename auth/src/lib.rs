//! Credential primitives library
//!
//! Provides the building blocks of the identity service:
//! - Password hashing (Argon2id)
//! - Signed session tokens (HS256 JWT) with a fixed issuer and lifetime
//! - The closed set of authorization roles
//!
//! Persistence, orchestration and request gating live in the service crate,
//! which adapts these implementations behind its own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Role, SigningSecret, TokenService};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(&secret);
//!
//! let issued = tokens.issue("user123", Role::User).unwrap();
//! let claims = tokens.validate(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.role, Role::User);
//! ```

pub mod jwt;
pub mod password;
pub mod roles;
pub mod token;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SecretError;
pub use jwt::SigningSecret;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use roles::Role;
pub use roles::RoleError;
pub use token::IssuedToken;
pub use token::TokenService;
pub use token::TOKEN_ISSUER;
pub use token::TOKEN_LIFETIME_HOURS;
