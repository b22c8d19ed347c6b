//! Credential checks for both directories.
//!
//! An unknown email and a wrong password produce the same
//! `AuthError::InvalidCredentials` so the response does not reveal which
//! accounts exist.

use std::sync::Arc;

use crate::domain::admin::Admin;
use crate::domain::client::Client;
use crate::domain::foundation::AuthError;
use crate::ports::{AdminRepository, ClientRepository, PasswordHasher};

pub struct CredentialsValidator {
    clients: Arc<dyn ClientRepository>,
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl CredentialsValidator {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            clients,
            admins,
            hasher,
        }
    }

    pub async fn validate_client(&self, email: &str, password: &str) -> Result<Client, AuthError> {
        let client = self
            .clients
            .find_by_email(email)
            .await
            .map_err(lookup_failed)?
            .ok_or(AuthError::InvalidCredentials)?;
        self.check(password, client.password_hash())?;
        Ok(client)
    }

    pub async fn validate_admin(&self, email: &str, password: &str) -> Result<Admin, AuthError> {
        let admin = self
            .admins
            .find_by_email(email)
            .await
            .map_err(lookup_failed)?
            .ok_or(AuthError::InvalidCredentials)?;
        self.check(password, admin.password_hash())?;
        Ok(admin)
    }

    fn check(&self, password: &str, hash: &str) -> Result<(), AuthError> {
        if self.hasher.verify(password, hash)? {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn lookup_failed(err: crate::domain::foundation::DomainError) -> AuthError {
    tracing::error!(error = %err, "Credential lookup failed");
    AuthError::service_unavailable("credential lookup failed")
}
