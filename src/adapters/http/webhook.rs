//! Gateway webhook endpoint.
//!
//! Mounted at both `/membership/webhook` and `/store/webhook`. Either path
//! routes both payment types, and the reply is always 200 so the gateway
//! does not retry.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::application::handlers::webhook::{DispatchWebhookCommand, WebhookReply};
use crate::domain::payment::SIGNATURE_HEADER;

use super::state::AppState;

pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<WebhookReply> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let outcome = state
        .webhook_handler()
        .handle(DispatchWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await;

    Json(WebhookReply::from(outcome))
}
