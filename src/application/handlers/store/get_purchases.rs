//! Purchase queries: the admin ledger and single-purchase lookup.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, PurchaseId};
use crate::domain::store::{Purchase, StoreError};
use crate::ports::PurchaseRepository;

pub struct ListPurchasesHandler {
    purchases: Arc<dyn PurchaseRepository>,
}

impl ListPurchasesHandler {
    pub fn new(purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self { purchases }
    }

    /// Every purchase, newest first.
    pub async fn handle(&self) -> Result<Vec<Purchase>, StoreError> {
        Ok(self.purchases.list_all().await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetPurchaseQuery {
    pub actor: AuthenticatedUser,
    pub purchase_id: PurchaseId,
}

pub struct GetPurchaseHandler {
    purchases: Arc<dyn PurchaseRepository>,
}

impl GetPurchaseHandler {
    pub fn new(purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self { purchases }
    }

    /// Owner or admin only.
    pub async fn handle(&self, query: GetPurchaseQuery) -> Result<Purchase, StoreError> {
        let purchase = self
            .purchases
            .find_by_id(&query.purchase_id)
            .await?
            .ok_or(StoreError::PurchaseNotFound)?;

        if !query.actor.can_access_client(purchase.client_id()) {
            return Err(StoreError::forbidden("You can only view your own purchases"));
        }
        Ok(purchase)
    }
}
