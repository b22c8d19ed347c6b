//! DispatchWebhookHandler - routes gateway callbacks to the matching verification.
//!
//! The gateway only ever sees two replies: "Invalid signature" when the body
//! is not authenticated, and "Webhook processed successfully" otherwise.
//! Routing and verification failures are logged and acknowledged so that
//! deliveries are not retried forever.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::payment::{GatewayEvent, PaymentType, WebhookError};
use crate::domain::store::StoreError;
use crate::ports::PaymentGateway;

use super::super::membership::{VerifyPaymentCommand, VerifyPaymentHandler};
use super::super::store::{VerifyPurchaseCommand, VerifyPurchaseHandler};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct DispatchWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `x-paystack-signature` header, if present.
    pub signature: Option<String>,
}

/// What the gateway is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    InvalidSignature,
    Processed,
}

impl WebhookOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            WebhookOutcome::InvalidSignature => "Invalid signature",
            WebhookOutcome::Processed => "Webhook processed successfully",
        }
    }
}

/// JSON reply body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookReply {
    pub message: String,
}

impl From<WebhookOutcome> for WebhookReply {
    fn from(outcome: WebhookOutcome) -> Self {
        Self {
            message: outcome.message().to_string(),
        }
    }
}

/// Which verification ran for a routed event.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Routed {
    Membership(String),
    StorePurchase(String),
}

pub struct DispatchWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
    membership: Arc<VerifyPaymentHandler>,
    store: Arc<VerifyPurchaseHandler>,
}

impl DispatchWebhookHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        membership: Arc<VerifyPaymentHandler>,
        store: Arc<VerifyPurchaseHandler>,
    ) -> Self {
        Self {
            gateway,
            membership,
            store,
        }
    }

    pub async fn handle(&self, cmd: DispatchWebhookCommand) -> WebhookOutcome {
        let signature = cmd.signature.as_deref().unwrap_or_default();
        if signature.is_empty() || !self.gateway.verify_webhook_signature(&cmd.payload, signature) {
            tracing::warn!("Webhook rejected: invalid signature");
            return WebhookOutcome::InvalidSignature;
        }

        match self.route(&cmd.payload).await {
            Ok(Routed::Membership(reference)) => {
                tracing::info!(reference = %reference, "Membership verified from webhook");
            }
            Ok(Routed::StorePurchase(reference)) => {
                tracing::info!(reference = %reference, "Store purchase verified from webhook");
            }
            Err(e) if e.is_benign() => {
                tracing::debug!(reason = %e, "Webhook ignored");
            }
            Err(e) => {
                tracing::error!(error = %e, "Webhook verification failed");
            }
        }
        WebhookOutcome::Processed
    }

    async fn route(&self, payload: &[u8]) -> Result<Routed, WebhookError> {
        let event = GatewayEvent::parse(payload)?;
        if !event.is_charge_success() {
            return Err(WebhookError::Ignored(event.event));
        }

        let payment_type = event.payment_type();
        match payment_type {
            Some(PaymentType::Membership) => {
                let reference = event.reference()?.to_string();
                self.membership
                    .handle(VerifyPaymentCommand {
                        reference: reference.clone(),
                    })
                    .await
                    .map_err(|e| WebhookError::Verification(e.message()))?;
                Ok(Routed::Membership(reference))
            }
            Some(PaymentType::StorePurchase) => {
                let reference = event.reference()?.to_string();
                self.store
                    .handle(VerifyPurchaseCommand {
                        reference: reference.clone(),
                    })
                    .await
                    .map_err(|e| match e {
                        StoreError::AlreadyVerified => WebhookError::Ignored(e.message()),
                        other => WebhookError::Verification(other.message()),
                    })?;
                Ok(Routed::StorePurchase(reference))
            }
            Some(PaymentType::Unknown) | None => Err(WebhookError::Ignored(format!(
                "payment_type {}",
                payment_type.map_or("missing", |t| t.as_str())
            ))),
        }
    }
}
