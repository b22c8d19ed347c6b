//! Gateway callback payload.

use serde::Deserialize;
use serde_json::Value;

use super::metadata::{PaymentMetadata, PaymentType};
use super::webhook_errors::WebhookError;

/// The only event type the dispatcher acts on.
pub const CHARGE_SUCCESS_EVENT: &str = "charge.success";

/// An event delivered to the webhook endpoints.
///
/// Only the fields the dispatcher reads are modelled; everything else in the
/// gateway payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEvent {
    pub event: String,
    #[serde(default)]
    pub data: GatewayEventData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayEventData {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub metadata: Value,
}

impl GatewayEvent {
    /// Parses a raw request body.
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    pub fn is_charge_success(&self) -> bool {
        self.event == CHARGE_SUCCESS_EVENT
    }

    pub fn metadata(&self) -> PaymentMetadata {
        PaymentMetadata::from_value(&self.data.metadata)
    }

    /// Payment type tag carried in `data.metadata`.
    pub fn payment_type(&self) -> Option<PaymentType> {
        self.metadata().payment_type
    }

    /// Transaction reference, required for every routed event.
    pub fn reference(&self) -> Result<&str, WebhookError> {
        self.data
            .reference
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or(WebhookError::MissingMetadata("reference"))
    }
}
