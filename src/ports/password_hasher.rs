//! Password hashing port.

use crate::domain::foundation::AuthError;

/// One-way password hashing.
///
/// Hashes are self-describing strings that embed their salt and parameters.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Returns `Ok(false)` for a wrong password. Errors are reserved for a
    /// stored hash that cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
