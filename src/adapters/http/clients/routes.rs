//! Axum router configuration for client endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    activate_membership, client_purchases, deactivate_membership, delete_client, forgot_password,
    get_client, list_clients, login, me, reset_password, signup, update_client,
};

/// Routes mounted at `/clients`.
///
/// Static segments (`/me`, `/signup`, `/active/:id`) take priority over `/:id`.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/active/:id", patch(activate_membership))
        .route("/inactive/:id", patch(deactivate_membership))
        .route(
            "/:id",
            get(get_client).patch(update_client).delete(delete_client),
        )
        .route("/:id/purchases", get(client_purchases))
}
