//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to the membership command/query handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::membership::{
    GetMembershipStatusQuery, InitializePaymentCommand, VerifyPaymentCommand,
};

use super::super::error::ApiError;
use super::super::extract::AppJson;
use super::super::middleware::RequireClient;
use super::super::state::AppState;
use super::dto::{InitializePaymentRequest, VerifyPaymentRequest};

/// POST /membership/initialize-payment
pub async fn initialize_payment(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
    AppJson(request): AppJson<InitializePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handle = state
        .initialize_payment_handler()
        .handle(InitializePaymentCommand {
            client_id,
            amount: request.amount,
        })
        .await?;
    Ok(Json(handle))
}

/// POST /membership/verify-payment
pub async fn verify_payment(
    State(state): State<AppState>,
    _client: RequireClient,
    AppJson(request): AppJson<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .verify_payment_handler()
        .handle(VerifyPaymentCommand {
            reference: request.reference,
        })
        .await?;
    Ok(Json(result))
}

/// GET /membership/status
pub async fn status(
    State(state): State<AppState>,
    RequireClient(client_id): RequireClient,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .membership_status_handler()
        .handle(GetMembershipStatusQuery { client_id })
        .await?;
    Ok(Json(snapshot))
}
