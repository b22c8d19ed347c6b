use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{dashboard, login};

/// Routes mounted at `/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/dashboard", get(dashboard))
}
