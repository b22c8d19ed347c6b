//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::foundation::AuthError;
use crate::ports::PasswordHasher;

/// Produces PHC strings (`$argon2id$v=19$...`) with a fresh random salt.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum-cost parameters. Only for tests and local seeding.
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::service_unavailable(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::error!(error = %e, "Stored password hash is unreadable");
            AuthError::service_unavailable("stored password hash is invalid")
        })?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = Argon2PasswordHasher::low_cost();
        let hash = hasher.hash("secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("secret123", &hash).unwrap());
        assert!(!hasher.verify("secret124", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let hasher = Argon2PasswordHasher::low_cost();
        assert_ne!(hasher.hash("pw1234").unwrap(), hasher.hash("pw1234").unwrap());
    }

    #[test]
    fn default_cost_hash_verifies_with_low_cost_hasher() {
        let hash = Argon2PasswordHasher::new().hash("secret123").unwrap();
        assert!(Argon2PasswordHasher::low_cost().verify("secret123", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        let result = Argon2PasswordHasher::new().verify("pw", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }
}
