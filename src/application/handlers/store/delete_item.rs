//! DeleteStoreItemHandler - removes a catalogue item.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::StoreItemId;
use crate::domain::store::StoreError;
use crate::ports::StoreItemRepository;

#[derive(Debug, Clone)]
pub struct DeleteStoreItemCommand {
    pub id: StoreItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteStoreItemResult {
    pub message: String,
}

pub struct DeleteStoreItemHandler {
    items: Arc<dyn StoreItemRepository>,
}

impl DeleteStoreItemHandler {
    pub fn new(items: Arc<dyn StoreItemRepository>) -> Self {
        Self { items }
    }

    /// # Errors
    ///
    /// - `ItemNotFound` if the item doesn't exist
    /// - `Conflict` if any purchase line still references it
    pub async fn handle(&self, cmd: DeleteStoreItemCommand) -> Result<DeleteStoreItemResult, StoreError> {
        if self.items.find_by_id(&cmd.id).await?.is_none() {
            return Err(StoreError::item_not_found());
        }
        self.items.delete(&cmd.id).await?;

        tracing::info!(store_item_id = %cmd.id, "Store item deleted");
        Ok(DeleteStoreItemResult {
            message: "Store item deleted successfully".to_string(),
        })
    }
}
