//! Store handlers.
//!
//! ## Catalogue
//! - Create, update and delete items (admin)
//! - List and get items (public)
//!
//! ## Purchases
//! - Create a purchase and open its checkout
//! - Verify a purchase payment (client call or webhook)
//! - List all purchases (admin), get one (owner or admin)

mod create_item;
mod create_purchase;
mod delete_item;
mod get_items;
mod get_purchases;
mod update_item;
mod verify_purchase;

// Catalogue
pub use create_item::{CreateStoreItemCommand, CreateStoreItemHandler};
pub use delete_item::{DeleteStoreItemCommand, DeleteStoreItemHandler, DeleteStoreItemResult};
pub use get_items::{
    GetStoreItemHandler, GetStoreItemQuery, ListStoreItemsHandler, ListStoreItemsQuery,
};
pub use update_item::{UpdateStoreItemCommand, UpdateStoreItemHandler};

// Purchases
pub use create_purchase::{CreatePurchaseCommand, CreatePurchaseHandler, CreatePurchaseResult};
pub use get_purchases::{GetPurchaseHandler, GetPurchaseQuery, ListPurchasesHandler};
pub use verify_purchase::{VerifyPurchaseCommand, VerifyPurchaseHandler, VerifyPurchaseResult};
