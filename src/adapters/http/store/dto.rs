//! Request bodies and query strings for the store endpoints.

use serde::Deserialize;

use crate::domain::store::{DeliveryOption, PurchaseLine};

/// `GET /store/items?include_inactive=true`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsParams {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchaseRequest {
    pub items: Vec<PurchaseLine>,
    pub delivery_option: DeliveryOption,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPurchaseRequest {
    pub reference: String,
}
