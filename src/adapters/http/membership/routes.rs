//! Axum router configuration for membership endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::super::webhook::receive_webhook;
use super::handlers::{initialize_payment, status, verify_payment};

/// Routes mounted at `/membership`.
///
/// # Routes
///
/// ## Client Endpoints
/// - `POST /initialize-payment` - Start a membership checkout
/// - `POST /verify-payment` - Confirm a checkout after redirect
/// - `GET /status` - Current membership state
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhook`
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/initialize-payment", post(initialize_payment))
        .route("/verify-payment", post(verify_payment))
        .route("/status", get(status))
        .route("/webhook", post(receive_webhook))
}
