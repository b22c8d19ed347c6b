//! Axum router configuration for store endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::super::webhook::receive_webhook;
use super::handlers::{
    create_item, create_purchase, delete_item, get_item, get_purchase, list_items,
    list_purchases, update_item, verify_purchase,
};

/// Routes mounted at `/store`.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/purchase", post(create_purchase))
        .route("/verify-purchase", post(verify_purchase))
        .route("/purchases", get(list_purchases))
        .route("/purchases/:id", get(get_purchase))
        .route("/webhook", post(receive_webhook))
}
