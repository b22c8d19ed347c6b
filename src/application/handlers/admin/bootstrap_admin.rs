//! BootstrapAdminHandler - creates the first admin account at startup.
//!
//! There is no admin signup endpoint; the account comes from configuration.

use std::sync::Arc;

use crate::domain::admin::Admin;
use crate::domain::client::validate_password;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{AdminRepository, PasswordHasher};

#[derive(Debug, Clone)]
pub struct BootstrapAdminCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyExists,
}

pub struct BootstrapAdminHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl BootstrapAdminHandler {
    pub fn new(admins: Arc<dyn AdminRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { admins, hasher }
    }

    pub async fn handle(&self, cmd: BootstrapAdminCommand) -> Result<BootstrapOutcome, DomainError> {
        if self.admins.find_by_email(&cmd.email).await?.is_some() {
            return Ok(BootstrapOutcome::AlreadyExists);
        }

        validate_password(&cmd.password)
            .map_err(|e| DomainError::validation(e.field(), e.to_string()))?;
        let hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        let admin = Admin::new(&cmd.email, hash, &cmd.first_name, &cmd.last_name)
            .map_err(|e| DomainError::validation(e.field(), e.to_string()))?;
        self.admins.save(&admin).await?;

        tracing::info!(admin_id = %admin.id(), email = %admin.email(), "Bootstrap admin created");
        Ok(BootstrapOutcome::Created)
    }
}
