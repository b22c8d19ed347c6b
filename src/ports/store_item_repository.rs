//! Store catalogue repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StoreItemId};
use crate::domain::store::StoreItem;

#[async_trait]
pub trait StoreItemRepository: Send + Sync {
    async fn save(&self, item: &StoreItem) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `StoreItemNotFound` if the item doesn't exist
    async fn update(&self, item: &StoreItem) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &StoreItemId) -> Result<Option<StoreItem>, DomainError>;

    /// Newest first. Inactive items are skipped unless requested.
    async fn list(&self, include_inactive: bool) -> Result<Vec<StoreItem>, DomainError>;

    /// # Errors
    ///
    /// - `StoreItemNotFound` if the item doesn't exist
    /// - `Conflict` if purchases still reference the item
    async fn delete(&self, id: &StoreItemId) -> Result<(), DomainError>;
}
