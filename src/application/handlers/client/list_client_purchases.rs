//! ListClientPurchasesHandler - a client's order history, newest first.

use std::sync::Arc;

use crate::domain::client::ClientError;
use crate::domain::foundation::{AuthenticatedUser, ClientId};
use crate::domain::store::Purchase;
use crate::ports::{ClientRepository, PurchaseRepository};

#[derive(Debug, Clone)]
pub struct ListClientPurchasesQuery {
    pub actor: AuthenticatedUser,
    pub client_id: ClientId,
}

pub struct ListClientPurchasesHandler {
    clients: Arc<dyn ClientRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl ListClientPurchasesHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self { clients, purchases }
    }

    pub async fn handle(&self, query: ListClientPurchasesQuery) -> Result<Vec<Purchase>, ClientError> {
        if !query.actor.can_access_client(&query.client_id) {
            return Err(ClientError::forbidden("You can only view your own purchases"));
        }
        if self.clients.find_by_id(&query.client_id).await?.is_none() {
            return Err(ClientError::not_found());
        }
        Ok(self.purchases.list_by_client(&query.client_id).await?)
    }
}
