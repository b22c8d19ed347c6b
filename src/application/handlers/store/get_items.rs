//! Public catalogue queries.

use std::sync::Arc;

use crate::domain::foundation::StoreItemId;
use crate::domain::store::{StoreError, StoreItem};
use crate::ports::StoreItemRepository;

#[derive(Debug, Clone, Default)]
pub struct ListStoreItemsQuery {
    pub include_inactive: bool,
}

pub struct ListStoreItemsHandler {
    items: Arc<dyn StoreItemRepository>,
}

impl ListStoreItemsHandler {
    pub fn new(items: Arc<dyn StoreItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, query: ListStoreItemsQuery) -> Result<Vec<StoreItem>, StoreError> {
        Ok(self.items.list(query.include_inactive).await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetStoreItemQuery {
    pub id: StoreItemId,
}

pub struct GetStoreItemHandler {
    items: Arc<dyn StoreItemRepository>,
}

impl GetStoreItemHandler {
    pub fn new(items: Arc<dyn StoreItemRepository>) -> Self {
        Self { items }
    }

    pub async fn handle(&self, query: GetStoreItemQuery) -> Result<StoreItem, StoreError> {
        self.items
            .find_by_id(&query.id)
            .await?
            .ok_or_else(StoreError::item_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn inactive_items_are_hidden_by_default() {
        let fx = Fixture::new();
        fx.seed_item("Towel", 3000.0, 5, true).await;
        fx.seed_item("Old Shirt", 2000.0, 5, false).await;
        let handler = ListStoreItemsHandler::new(fx.items());

        let visible = handler.handle(ListStoreItemsQuery::default()).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name(), "Towel");

        let all = handler
            .handle(ListStoreItemsQuery {
                include_inactive: true,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let fx = Fixture::new();
        let err = GetStoreItemHandler::new(fx.items())
            .handle(GetStoreItemQuery {
                id: StoreItemId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Store item not found");
    }

    #[tokio::test]
    async fn inactive_item_is_still_readable_by_id() {
        let fx = Fixture::new();
        let item = fx.seed_item("Old Shirt", 2000.0, 5, false).await;
        let found = GetStoreItemHandler::new(fx.items())
            .handle(GetStoreItemQuery { id: *item.id() })
            .await
            .unwrap();
        assert_eq!(found.id(), item.id());
    }
}
