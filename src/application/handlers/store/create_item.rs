//! CreateStoreItemHandler - adds an item to the catalogue.

use std::sync::Arc;

use crate::application::uploads::{store_image, ImageUpload, STORE_ITEMS_FOLDER};
use crate::domain::foundation::Money;
use crate::domain::store::{NewStoreItem, StoreError, StoreItem};
use crate::ports::{FileStorage, StoreItemRepository};

#[derive(Debug, Clone)]
pub struct CreateStoreItemCommand {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub quantity: i32,
    pub is_active: Option<bool>,
    pub image: Option<ImageUpload>,
}

pub struct CreateStoreItemHandler {
    items: Arc<dyn StoreItemRepository>,
    storage: Arc<dyn FileStorage>,
}

impl CreateStoreItemHandler {
    pub fn new(items: Arc<dyn StoreItemRepository>, storage: Arc<dyn FileStorage>) -> Self {
        Self { items, storage }
    }

    pub async fn handle(&self, cmd: CreateStoreItemCommand) -> Result<StoreItem, StoreError> {
        let mut input = NewStoreItem {
            name: cmd.name,
            description: cmd.description,
            price: cmd.price,
            quantity: cmd.quantity,
            is_active: cmd.is_active,
            image_url: None,
        };
        // Validate before spending an upload on a bad item.
        StoreItem::new(input.clone())?;

        if let Some(upload) = cmd.image {
            input.image_url = Some(
                store_image(self.storage.as_ref(), STORE_ITEMS_FOLDER, upload)
                    .await
                    .map_err(|e| StoreError::infrastructure(e.to_string()))?,
            );
        }

        let item = StoreItem::new(input)?;
        self.items.save(&item).await?;

        tracing::info!(store_item_id = %item.id(), name = %item.name(), "Store item created");
        Ok(item)
    }
}
