//! Admin repository port.

use async_trait::async_trait;

use crate::domain::admin::Admin;
use crate::domain::foundation::{AdminId, DomainError};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError>;

    /// Insert an admin. Used by the startup bootstrap only.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is taken
    async fn save(&self, admin: &Admin) -> Result<(), DomainError>;
}
