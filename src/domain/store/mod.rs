//! Store catalogue and purchases.
//!
//! - `item` - StoreItem catalogue entries
//! - `purchase` - Purchase aggregate, line items, delivery and status enums
//! - `errors` - StoreError

mod errors;
mod item;
mod purchase;

pub use errors::StoreError;
pub use item::{NewStoreItem, StoreItem, StoreItemChanges};
pub use purchase::{
    DeliveryOption, Purchase, PurchaseItem, PurchaseLine, PurchaseStatus,
};
