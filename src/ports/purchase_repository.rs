//! Purchase repository port.
//!
//! # Atomicity
//!
//! - `create` writes the purchase and all its line items in one transaction.
//! - `complete` moves a stored purchase from PENDING to COMPLETED, setting
//!   the verification flag only if it is still unset, and withdraws stock
//!   for every line in the same transaction. Of two concurrent calls for one
//!   purchase, exactly one returns the completed purchase.

use async_trait::async_trait;

use crate::domain::admin::SalesSummary;
use crate::domain::foundation::{ClientId, DomainError, PurchaseId};
use crate::domain::store::Purchase;

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Insert a pending purchase with its line items.
    async fn create(&self, purchase: &Purchase) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError>;

    /// All purchases, newest first.
    async fn list_all(&self) -> Result<Vec<Purchase>, DomainError>;

    /// The latest `limit` purchases, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Purchase>, DomainError>;

    /// A client's purchases, newest first.
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Purchase>, DomainError>;

    /// Completes the stored purchase and withdraws its stock.
    ///
    /// Returns the completed purchase, or `None` without changing anything if
    /// it was already verified.
    ///
    /// # Errors
    ///
    /// - `PurchaseNotFound` if no purchase has this id
    async fn complete(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError>;

    async fn sales_summary(&self) -> Result<SalesSummary, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PurchaseRepository) {}
    }
}
