//! GetClientHandler - a client profile together with their purchases.
//!
//! Backs both `GET /clients/me` and `GET /clients/{id}`.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::client::{ClientError, ClientProfile};
use crate::domain::foundation::ClientId;
use crate::domain::store::Purchase;
use crate::ports::{ClientRepository, PurchaseRepository};

#[derive(Debug, Clone)]
pub struct GetClientQuery {
    pub client_id: ClientId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub profile: ClientProfile,
    pub purchases: Vec<Purchase>,
}

pub struct GetClientHandler {
    clients: Arc<dyn ClientRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl GetClientHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self { clients, purchases }
    }

    pub async fn handle(&self, query: GetClientQuery) -> Result<ClientDetail, ClientError> {
        let client = self
            .clients
            .find_by_id(&query.client_id)
            .await?
            .ok_or_else(ClientError::not_found)?;
        let purchases = self.purchases.list_by_client(client.id()).await?;
        Ok(ClientDetail {
            profile: client.profile(),
            purchases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::membership::MembershipStatus;
    use crate::domain::store::{DeliveryOption, Purchase};

    #[tokio::test]
    async fn detail_includes_purchases() {
        let fx = Fixture::new();
        let client = fx.seed_client("ada@gym.ng", MembershipStatus::Active).await;
        let item = fx.seed_item("Towel", 5000.0, 5, true).await;
        let purchase = Purchase::place(
            *client.id(),
            DeliveryOption::Pickup,
            None,
            "purchase_1_a",
            &[(item, 1)],
        )
        .unwrap();
        fx.purchases().create(&purchase).await.unwrap();

        let detail = GetClientHandler::new(fx.clients(), fx.purchases())
            .handle(GetClientQuery {
                client_id: *client.id(),
            })
            .await
            .unwrap();

        assert_eq!(detail.profile.id, *client.id());
        assert_eq!(detail.purchases.len(), 1);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["email"], "ada@gym.ng");
        assert_eq!(json["purchases"][0]["total_amount"], 5000.0);
    }

    #[tokio::test]
    async fn missing_client_is_not_found() {
        let fx = Fixture::new();
        let err = GetClientHandler::new(fx.clients(), fx.purchases())
            .handle(GetClientQuery {
                client_id: ClientId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::NotFound);
    }
}
