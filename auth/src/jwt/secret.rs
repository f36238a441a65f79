use std::fmt;

use super::errors::SecretError;

/// Symmetric key used to sign and verify session tokens.
///
/// Built once at startup from configuration and handed to the token service;
/// it is never mutated afterwards. The key bytes are kept out of `Debug`
/// output so the value can sit inside logged configuration structs.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Recommended minimum key size for HS256 (256 bits).
    pub const RECOMMENDED_MIN_LENGTH: usize = 32;

    /// Create a signing secret from raw key material.
    ///
    /// # Arguments
    /// * `secret` - Key bytes, typically read from configuration
    ///
    /// # Errors
    /// * `Empty` - No key material was supplied
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(secret))
    }

    /// Whether the key is shorter than [`Self::RECOMMENDED_MIN_LENGTH`].
    pub fn is_weak(&self) -> bool {
        self.0.len() < Self::RECOMMENDED_MIN_LENGTH
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}
