//! UpdateStoreItemHandler - partial edit of a catalogue item.

use std::sync::Arc;

use crate::application::uploads::{store_image, ImageUpload, STORE_ITEMS_FOLDER};
use crate::domain::foundation::StoreItemId;
use crate::domain::store::{StoreError, StoreItem, StoreItemChanges};
use crate::ports::{FileStorage, StoreItemRepository};

#[derive(Debug, Clone)]
pub struct UpdateStoreItemCommand {
    pub id: StoreItemId,
    /// `image_url` is ignored; a new image comes only from `image`.
    pub changes: StoreItemChanges,
    pub image: Option<ImageUpload>,
}

pub struct UpdateStoreItemHandler {
    items: Arc<dyn StoreItemRepository>,
    storage: Arc<dyn FileStorage>,
}

impl UpdateStoreItemHandler {
    pub fn new(items: Arc<dyn StoreItemRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self { items, storage }
    }

    pub async fn handle(&self, cmd: UpdateStoreItemCommand) -> Result<StoreItem, StoreError> {
        let mut item = self
            .items
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(StoreError::item_not_found)?;

        let mut changes = cmd.changes;
        changes.image_url = None;
        item.clone().apply(changes.clone())?;

        if let Some(upload) = cmd.image {
            changes.image_url = Some(
                store_image(self.storage.as_ref(), STORE_ITEMS_FOLDER, upload)
                    .await
                    .map_err(|e| StoreError::infrastructure(e.to_string()))?,
            );
        }
        item.apply(changes)?;
        self.items.update(&item).await?;

        tracing::info!(store_item_id = %item.id(), "Store item updated");
        Ok(item)
    }
}
