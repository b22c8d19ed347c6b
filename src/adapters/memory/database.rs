//! In-memory relational store.
//!
//! One lock guards every table so that purchase completion and stock
//! withdrawal are atomic, matching the transactional Postgres adapter.
//! Used by tests and for running the API without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::admin::{Admin, MembershipCounts, SalesSummary};
use crate::domain::client::Client;
use crate::domain::foundation::{
    AdminId, ClientId, DomainError, ErrorCode, Money, PurchaseId, StoreItemId,
};
use crate::domain::store::{Purchase, PurchaseStatus, StoreItem};
use crate::ports::{
    AdminRepository, ClientListEntry, ClientListQuery, ClientPage, ClientRepository,
    PurchaseRepository, StoreItemRepository,
};

#[derive(Debug, Default)]
struct Tables {
    clients: HashMap<ClientId, Client>,
    admins: HashMap<AdminId, Admin>,
    items: HashMap<StoreItemId, StoreItem>,
    purchases: HashMap<PurchaseId, Purchase>,
}

impl Tables {
    fn purchases_newest_first(&self) -> Vec<Purchase> {
        let mut purchases: Vec<Purchase> = self.purchases.values().cloned().collect();
        purchases.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        purchases
    }
}

/// In-memory implementation of every repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored purchases.
    pub async fn purchase_count(&self) -> usize {
        self.tables.read().await.purchases.len()
    }
}

#[async_trait]
impl ClientRepository for InMemoryDatabase {
    async fn create(&self, client: &Client) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.clients.values().any(|c| c.email() == client.email()) {
            return Err(DomainError::new(
                ErrorCode::EmailAlreadyRegistered,
                "Email already registered",
            ));
        }
        tables.clients.insert(*client.id(), client.clone());
        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.clients.get_mut(client.id()) {
            Some(stored) => {
                *stored = client.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found")),
        }
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        Ok(self.tables.read().await.clients.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .clients
            .values()
            .find(|c| c.email() == email)
            .cloned())
    }

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.clients.remove(id).is_none() {
            return Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found"));
        }
        tables.purchases.retain(|_, p| p.client_id() != id);
        Ok(())
    }

    async fn list(&self, query: &ClientListQuery) -> Result<ClientPage, DomainError> {
        let tables = self.tables.read().await;
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut matching: Vec<&Client> = tables
            .clients
            .values()
            .filter(|c| query.status.map_or(true, |s| c.membership().status == s))
            .filter(|c| {
                search.as_deref().map_or(true, |term| {
                    c.email().contains(term)
                        || c.first_name().to_lowercase().contains(term)
                        || c.last_name().to_lowercase().contains(term)
                })
            })
            .collect();
        matching.sort_by(|a, b| b.created_at().cmp(a.created_at()));

        let total = matching.len() as u64;
        let entries = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .map(|client| ClientListEntry {
                purchase_count: tables
                    .purchases
                    .values()
                    .filter(|p| p.client_id() == client.id())
                    .count() as u64,
                client: client.clone(),
            })
            .collect();

        Ok(ClientPage { entries, total })
    }

    async fn membership_counts(&self) -> Result<MembershipCounts, DomainError> {
        let mut counts = MembershipCounts::default();
        for client in self.tables.read().await.clients.values() {
            counts.add(client.membership().status, 1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl AdminRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        Ok(self.tables.read().await.admins.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .await
            .admins
            .values()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn save(&self, admin: &Admin) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.admins.values().any(|a| a.email() == admin.email()) {
            return Err(DomainError::new(ErrorCode::Conflict, "Admin email already exists"));
        }
        tables.admins.insert(*admin.id(), admin.clone());
        Ok(())
    }
}

#[async_trait]
impl StoreItemRepository for InMemoryDatabase {
    async fn save(&self, item: &StoreItem) -> Result<(), DomainError> {
        self.tables.write().await.items.insert(*item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &StoreItem) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(item.id()) {
            Some(stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::StoreItemNotFound, "Store item not found")),
        }
    }

    async fn find_by_id(&self, id: &StoreItemId) -> Result<Option<StoreItem>, DomainError> {
        Ok(self.tables.read().await.items.get(id).cloned())
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<StoreItem>, DomainError> {
        let tables = self.tables.read().await;
        let mut items: Vec<StoreItem> = tables
            .items
            .values()
            .filter(|i| include_inactive || i.is_active())
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(items)
    }

    async fn delete(&self, id: &StoreItemId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let referenced = tables
            .purchases
            .values()
            .any(|p| p.items().iter().any(|line| &line.store_item_id == id));
        if referenced {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Store item is referenced by existing purchases",
            ));
        }
        if tables.items.remove(id).is_none() {
            return Err(DomainError::new(ErrorCode::StoreItemNotFound, "Store item not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryDatabase {
    async fn create(&self, purchase: &Purchase) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .purchases
            .values()
            .any(|p| p.payment_reference() == purchase.payment_reference())
        {
            return Err(DomainError::new(ErrorCode::Conflict, "Duplicate payment reference"));
        }
        tables.purchases.insert(*purchase.id(), purchase.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        Ok(self.tables.read().await.purchases.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Purchase>, DomainError> {
        Ok(self.tables.read().await.purchases_newest_first())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Purchase>, DomainError> {
        let mut purchases = self.tables.read().await.purchases_newest_first();
        purchases.truncate(limit);
        Ok(purchases)
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Purchase>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .purchases_newest_first()
            .into_iter()
            .filter(|p| p.client_id() == client_id)
            .collect())
    }

    async fn complete(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        let mut tables = self.tables.write().await;
        let purchase = match tables.purchases.get_mut(id) {
            None => {
                return Err(DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found"))
            }
            Some(stored) if stored.is_payment_verified() => return Ok(None),
            Some(stored) => {
                stored.complete()?;
                stored.clone()
            }
        };

        for line in purchase.items() {
            if let Some(item) = tables.items.get_mut(&line.store_item_id) {
                let remaining = item.withdraw(line.quantity);
                if remaining < 0 {
                    tracing::warn!(
                        store_item_id = %line.store_item_id,
                        remaining,
                        "Stock went negative after purchase completion"
                    );
                }
            }
        }
        Ok(Some(purchase))
    }

    async fn sales_summary(&self) -> Result<SalesSummary, DomainError> {
        let tables = self.tables.read().await;
        Ok(SalesSummary {
            total_purchases: tables.purchases.len() as u64,
            total_revenue: tables
                .purchases
                .values()
                .filter(|p| p.status() == PurchaseStatus::Completed)
                .map(|p| p.total_amount())
                .sum::<Money>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipStatus;
    use crate::domain::store::{DeliveryOption, NewStoreItem};

    fn client(email: &str, first: &str) -> Client {
        Client::register(email, "hash".into(), first, "Tester", None).unwrap()
    }

    fn stocked_item(quantity: i32) -> StoreItem {
        StoreItem::new(NewStoreItem {
            name: "Protein Powder".into(),
            description: None,
            price: Money::from_major(15000.0).unwrap(),
            quantity,
            is_active: None,
            image_url: None,
        })
        .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Clients
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = InMemoryDatabase::new();
        ClientRepository::create(&db, &client("a@gym.ng", "Ada")).await.unwrap();
        let err = ClientRepository::create(&db, &client("A@gym.ng", "Other"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailAlreadyRegistered);
    }

    #[tokio::test]
    async fn list_filters_by_search_and_pages() {
        let db = InMemoryDatabase::new();
        for (email, first) in [("ada@gym.ng", "Ada"), ("bola@gym.ng", "Bola"), ("chi@gym.ng", "Adaeze")] {
            ClientRepository::create(&db, &client(email, first)).await.unwrap();
        }

        let page = ClientRepository::list(
            &db,
            &ClientListQuery {
                page: 1,
                limit: 1,
                search: Some("ADA".into()),
                status: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.entries.len(), 1);
    }

    #[tokio::test]
    async fn membership_counts_group_by_status() {
        let db = InMemoryDatabase::new();
        let mut active = client("a@gym.ng", "Ada");
        active.membership_mut().status = MembershipStatus::Active;
        ClientRepository::create(&db, &active).await.unwrap();
        ClientRepository::create(&db, &client("b@gym.ng", "Bola")).await.unwrap();

        let counts = db.membership_counts().await.unwrap();
        assert_eq!(counts.active, 1);
        assert_eq!(counts.inactive, 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Purchases
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn complete_withdraws_stock_once() {
        let db = InMemoryDatabase::new();
        let item = stocked_item(5);
        StoreItemRepository::save(&db, &item).await.unwrap();

        let purchase = Purchase::place(
            ClientId::new(),
            DeliveryOption::Pickup,
            None,
            "purchase_1_abc",
            &[(item.clone(), 2)],
        )
        .unwrap();
        PurchaseRepository::create(&db, &purchase).await.unwrap();

        let completed = db.complete(purchase.id()).await.unwrap().unwrap();
        assert_eq!(completed.status(), PurchaseStatus::Completed);
        assert!(completed.is_payment_verified());
        assert!(db.complete(purchase.id()).await.unwrap().is_none());

        let stored = PurchaseRepository::find_by_id(&db, purchase.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), PurchaseStatus::Completed);
        assert!(stored.is_payment_verified());

        let stored = StoreItemRepository::find_by_id(&db, item.id()).await.unwrap().unwrap();
        assert_eq!(stored.quantity(), 3);

        let summary = db.sales_summary().await.unwrap();
        assert_eq!(summary.total_purchases, 1);
        assert_eq!(summary.total_revenue.to_major(), 30000.0);
    }

    #[tokio::test]
    async fn referenced_items_cannot_be_deleted() {
        let db = InMemoryDatabase::new();
        let item = stocked_item(5);
        StoreItemRepository::save(&db, &item).await.unwrap();
        let purchase = Purchase::place(
            ClientId::new(),
            DeliveryOption::Pickup,
            None,
            "purchase_2_abc",
            &[(item.clone(), 1)],
        )
        .unwrap();
        PurchaseRepository::create(&db, &purchase).await.unwrap();

        let err = StoreItemRepository::delete(&db, item.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}
