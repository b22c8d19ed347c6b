//! VerifyPurchaseHandler - completes a purchase once the gateway confirms the charge.
//!
//! Completion is a conditional write in the repository, so when the client's
//! verify call and the webhook race, only one of them withdraws stock.

use serde::Serialize;
use std::sync::Arc;

use crate::application::notifications;
use crate::domain::store::{Purchase, StoreError};
use crate::ports::{
    ClientRepository, EmailSender, PaymentGateway, PaymentReceipt, PurchaseRepository,
};

#[derive(Debug, Clone)]
pub struct VerifyPurchaseCommand {
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPurchaseResult {
    pub message: String,
    pub purchase: Purchase,
    pub payment: PaymentReceipt,
}

pub struct VerifyPurchaseHandler {
    clients: Arc<dyn ClientRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    gateway: Arc<dyn PaymentGateway>,
    email: Arc<dyn EmailSender>,
}

impl VerifyPurchaseHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        gateway: Arc<dyn PaymentGateway>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            clients,
            purchases,
            gateway,
            email,
        }
    }

    pub async fn handle(&self, cmd: VerifyPurchaseCommand) -> Result<VerifyPurchaseResult, StoreError> {
        let verification = self
            .gateway
            .verify_transaction(&cmd.reference)
            .await
            .map_err(|e| StoreError::payment_failed(e.message))?;

        if !verification.is_successful() {
            return Err(StoreError::VerificationFailed);
        }

        let purchase_id = verification
            .metadata()
            .purchase_id()
            .ok_or(StoreError::InvalidMetadata)?;

        let purchase = self
            .purchases
            .find_by_id(&purchase_id)
            .await?
            .ok_or(StoreError::PurchaseNotFound)?;
        if purchase.is_payment_verified() {
            return Err(StoreError::AlreadyVerified);
        }

        let purchase = self
            .purchases
            .complete(&purchase_id)
            .await?
            .ok_or(StoreError::AlreadyVerified)?;

        tracing::info!(
            purchase_id = %purchase_id,
            reference = %verification.reference,
            "Purchase verified"
        );

        match self.clients.find_by_id(purchase.client_id()).await {
            Ok(Some(client)) => {
                notifications::deliver(
                    self.email.as_ref(),
                    notifications::purchase_confirmation(&client, &purchase),
                    "purchase_confirmation",
                )
                .await;
                notifications::deliver(
                    self.email.as_ref(),
                    notifications::purchase_notification(&client, &purchase),
                    "purchase_notification",
                )
                .await;
            }
            Ok(None) => {
                tracing::warn!(purchase_id = %purchase_id, "Purchase owner missing; emails skipped");
            }
            Err(e) => {
                tracing::warn!(purchase_id = %purchase_id, error = %e, "Owner lookup failed; emails skipped");
            }
        }

        Ok(VerifyPurchaseResult {
            message: "Purchase verified successfully".to_string(),
            purchase,
            payment: verification.receipt(),
        })
    }
}
