//! HTTP handlers for admin endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::auth::LoginCommand;

use super::super::clients::dto::LoginRequest;
use super::super::error::ApiError;
use super::super::extract::AppJson;
use super::super::middleware::RequireAdmin;
use super::super::state::AppState;

/// POST /admin/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .login_admin(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok(Json(result))
}

/// GET /admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.dashboard_handler().handle().await?;
    Ok(Json(stats))
}
