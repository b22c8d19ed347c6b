//! CreatePurchaseHandler - places an order and opens a checkout for it.
//!
//! Stock is checked here but only withdrawn on verification, so two checkouts
//! racing for the last unit can both succeed.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{ClientId, Timestamp};
use crate::domain::payment::{PaymentMetadata, PURCHASE_REFERENCE_PREFIX};
use crate::domain::store::{DeliveryOption, Purchase, PurchaseLine, StoreError};
use crate::ports::{
    CheckoutHandle, ClientRepository, InitializeTransaction, PaymentGateway, PurchaseRepository,
    StoreItemRepository,
};

#[derive(Debug, Clone)]
pub struct CreatePurchaseCommand {
    pub client_id: ClientId,
    pub items: Vec<PurchaseLine>,
    pub delivery_option: DeliveryOption,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePurchaseResult {
    pub purchase: Purchase,
    pub payment: CheckoutHandle,
}

pub struct CreatePurchaseHandler {
    clients: Arc<dyn ClientRepository>,
    items: Arc<dyn StoreItemRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePurchaseHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        items: Arc<dyn StoreItemRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            clients,
            items,
            purchases,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: CreatePurchaseCommand) -> Result<CreatePurchaseResult, StoreError> {
        // 1. Only current members may buy
        let mut client = self
            .clients
            .find_by_id(&cmd.client_id)
            .await?
            .ok_or(StoreError::ClientNotFound)?;

        if client.membership_mut().refresh(Timestamp::now()) {
            self.clients.update(&client).await?;
            tracing::info!(client_id = %cmd.client_id, "Membership expired");
        }
        if !client.membership().status.is_active() {
            return Err(StoreError::MembershipRequired);
        }

        // 2. Order-level checks before touching the catalogue
        if cmd.items.is_empty() {
            return Err(StoreError::EmptyOrder);
        }
        cmd.delivery_option
            .resolve_address(cmd.delivery_address.as_deref())?;

        // 3. Load and check each line in request order
        let mut lines = Vec::with_capacity(cmd.items.len());
        for line in &cmd.items {
            let item = self
                .items
                .find_by_id(&line.store_item_id)
                .await?
                .ok_or(StoreError::ordered_item_not_found(line.store_item_id))?;
            item.ensure_orderable(line.quantity)?;
            lines.push((item, line.quantity));
        }

        // 4. Persist the pending order, then open the checkout
        let reference = self.gateway.generate_reference(PURCHASE_REFERENCE_PREFIX);
        let purchase = Purchase::place(
            cmd.client_id,
            cmd.delivery_option,
            cmd.delivery_address.as_deref(),
            reference.clone(),
            &lines,
        )?;
        self.purchases.create(&purchase).await?;

        let payment = self
            .gateway
            .initialize_transaction(InitializeTransaction {
                email: client.email().to_string(),
                amount: purchase.total_amount(),
                reference: reference.clone(),
                metadata: PaymentMetadata::store_purchase(
                    cmd.client_id,
                    *purchase.id(),
                    cmd.delivery_option.as_str(),
                ),
            })
            .await
            .map_err(|e| {
                tracing::warn!(
                    purchase_id = %purchase.id(),
                    error = %e,
                    "Checkout failed; purchase left pending"
                );
                StoreError::payment_failed(e.message)
            })?;

        tracing::info!(
            purchase_id = %purchase.id(),
            client_id = %cmd.client_id,
            reference = %reference,
            total = %purchase.total_amount(),
            "Purchase created"
        );
        Ok(CreatePurchaseResult { purchase, payment })
    }
}
