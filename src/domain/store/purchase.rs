//! Purchases and their line items.
//!
//! A purchase is created PENDING at checkout with prices captured from the
//! catalogue. It becomes COMPLETED exactly once, when the gateway confirms
//! payment. Stock is only checked at checkout; it is withdrawn on completion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    ClientId, Money, PurchaseId, PurchaseItemId, StateMachine, StoreItemId, Timestamp,
    ValidationError,
};

use super::{StoreError, StoreItem};

/// How the order reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryOption {
    Pickup,
    Delivery,
}

impl DeliveryOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Pickup => "PICKUP",
            DeliveryOption::Delivery => "DELIVERY",
        }
    }

    /// Returns the trimmed address, requiring one for delivery.
    pub fn resolve_address(&self, address: Option<&str>) -> Result<Option<String>, StoreError> {
        let address = address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        if *self == DeliveryOption::Delivery && address.is_none() {
            return Err(StoreError::DeliveryAddressRequired);
        }
        Ok(address)
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PICKUP" => Ok(DeliveryOption::Pickup),
            "DELIVERY" => Ok(DeliveryOption::Delivery),
            other => Err(format!("Unknown delivery option: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Completed,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "PENDING",
            PurchaseStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PurchaseStatus::Pending),
            "COMPLETED" => Ok(PurchaseStatus::Completed),
            other => Err(format!("Unknown purchase status: {}", other)),
        }
    }
}

impl StateMachine for PurchaseStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            PurchaseStatus::Pending => vec![PurchaseStatus::Completed],
            PurchaseStatus::Completed => vec![],
        }
    }
}

/// A requested order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PurchaseLine {
    pub store_item_id: StoreItemId,
    pub quantity: u32,
}

/// A line of a placed order. Prices are frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseItem {
    pub id: PurchaseItemId,
    pub store_item_id: StoreItemId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl PurchaseItem {
    fn snapshot(item: &StoreItem, quantity: u32) -> Self {
        let unit_price = item.price();
        Self {
            id: PurchaseItemId::new(),
            store_item_id: *item.id(),
            item_name: item.name().to_string(),
            quantity,
            unit_price,
            total_price: unit_price.times(quantity),
        }
    }
}

/// Purchase aggregate.
///
/// # Invariants
///
/// - `total_amount` equals the sum of line totals
/// - `payment_verified` is true iff `status` is COMPLETED
/// - DELIVERY purchases carry an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    id: PurchaseId,
    client_id: ClientId,
    total_amount: Money,
    delivery_option: DeliveryOption,
    delivery_address: Option<String>,
    payment_reference: String,
    payment_verified: bool,
    status: PurchaseStatus,
    items: Vec<PurchaseItem>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Purchase {
    /// Places a pending order for already-loaded catalogue items.
    ///
    /// # Errors
    ///
    /// In this order: `EmptyOrder`, `DeliveryAddressRequired`, a zero
    /// quantity, then per line `ItemUnavailable` or `InsufficientStock`.
    pub fn place(
        client_id: ClientId,
        delivery_option: DeliveryOption,
        delivery_address: Option<&str>,
        payment_reference: impl Into<String>,
        lines: &[(StoreItem, u32)],
    ) -> Result<Self, StoreError> {
        if lines.is_empty() {
            return Err(StoreError::EmptyOrder);
        }
        let delivery_address = delivery_option.resolve_address(delivery_address)?;

        let mut items = Vec::with_capacity(lines.len());
        for (item, quantity) in lines {
            if *quantity == 0 {
                return Err(ValidationError::too_small("quantity", 1, 0).into());
            }
            item.ensure_orderable(*quantity)?;
            items.push(PurchaseItem::snapshot(item, *quantity));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: PurchaseId::new(),
            client_id,
            total_amount: items.iter().map(|i| i.total_price).sum(),
            delivery_option,
            delivery_address,
            payment_reference: payment_reference.into(),
            payment_verified: false,
            status: PurchaseStatus::Pending,
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a purchase from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PurchaseId,
        client_id: ClientId,
        total_amount: Money,
        delivery_option: DeliveryOption,
        delivery_address: Option<String>,
        payment_reference: String,
        payment_verified: bool,
        status: PurchaseStatus,
        items: Vec<PurchaseItem>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            total_amount,
            delivery_option,
            delivery_address,
            payment_reference,
            payment_verified,
            status,
            items,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PurchaseId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn delivery_option(&self) -> DeliveryOption {
        self.delivery_option
    }

    pub fn delivery_address(&self) -> Option<&str> {
        self.delivery_address.as_deref()
    }

    pub fn payment_reference(&self) -> &str {
        &self.payment_reference
    }

    pub fn is_payment_verified(&self) -> bool {
        self.payment_verified
    }

    pub fn status(&self) -> PurchaseStatus {
        self.status
    }

    pub fn items(&self) -> &[PurchaseItem] {
        &self.items
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_owned_by(&self, client_id: &ClientId) -> bool {
        &self.client_id == client_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Marks the purchase paid.
    ///
    /// # Errors
    ///
    /// - `AlreadyVerified` if payment was verified before
    pub fn complete(&mut self) -> Result<(), StoreError> {
        if self.payment_verified {
            return Err(StoreError::AlreadyVerified);
        }
        self.status = self
            .status
            .transition_to(PurchaseStatus::Completed)
            .map_err(|_| StoreError::invalid_state(self.status.as_str(), "complete"))?;
        self.payment_verified = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::NewStoreItem;

    fn item(name: &str, price: f64, quantity: i32) -> StoreItem {
        StoreItem::new(NewStoreItem {
            name: name.into(),
            description: None,
            price: Money::from_major(price).unwrap(),
            quantity,
            is_active: Some(true),
            image_url: None,
        })
        .unwrap()
    }

    fn place(lines: &[(StoreItem, u32)]) -> Result<Purchase, StoreError> {
        Purchase::place(ClientId::new(), DeliveryOption::Pickup, None, "purchase_1_abc", lines)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Placing orders
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn total_is_sum_of_line_totals() {
        let purchase = place(&[
            (item("Protein Powder", 15000.0, 10), 2),
            (item("Shaker", 5000.0, 10), 1),
        ])
        .unwrap();

        assert_eq!(purchase.total_amount().to_major(), 35000.0);
        assert_eq!(purchase.items()[0].total_price.to_major(), 30000.0);
        assert_eq!(purchase.status(), PurchaseStatus::Pending);
        assert!(!purchase.is_payment_verified());
    }

    #[test]
    fn prices_are_snapshotted() {
        let mut powder = item("Protein Powder", 15000.0, 10);
        let purchase = place(&[(powder.clone(), 1)]).unwrap();
        powder
            .apply(crate::domain::store::StoreItemChanges {
                price: Some(Money::from_major(20000.0).unwrap()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(purchase.items()[0].unit_price.to_major(), 15000.0);
    }

    #[test]
    fn delivery_requires_address() {
        let lines = [(item("Mat", 8000.0, 3), 1)];
        let result = Purchase::place(ClientId::new(), DeliveryOption::Delivery, Some("  "), "r", &lines);
        assert_eq!(result.unwrap_err(), StoreError::DeliveryAddressRequired);

        let placed =
            Purchase::place(ClientId::new(), DeliveryOption::Delivery, Some(" 12 Marina, Lagos "), "r", &lines)
                .unwrap();
        assert_eq!(placed.delivery_address(), Some("12 Marina, Lagos"));
    }

    #[test]
    fn address_is_checked_before_stock() {
        let lines = [(item("Mat", 8000.0, 0), 1)];
        let result = Purchase::place(ClientId::new(), DeliveryOption::Delivery, None, "r", &lines);
        assert_eq!(result.unwrap_err(), StoreError::DeliveryAddressRequired);
    }

    #[test]
    fn insufficient_stock_names_item() {
        let result = place(&[(item("Kettlebell", 12000.0, 1), 2)]);
        assert_eq!(result.unwrap_err(), StoreError::insufficient_stock("Kettlebell", 1));
    }

    #[test]
    fn empty_order_and_zero_quantity_are_rejected() {
        assert_eq!(place(&[]).unwrap_err(), StoreError::EmptyOrder);
        assert!(matches!(
            place(&[(item("Band", 1000.0, 4), 0)]),
            Err(StoreError::ValidationFailed { .. })
        ));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Completion
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn complete_happens_once() {
        let mut purchase = place(&[(item("Band", 1000.0, 4), 1)]).unwrap();
        purchase.complete().unwrap();
        assert_eq!(purchase.status(), PurchaseStatus::Completed);
        assert!(purchase.is_payment_verified());

        assert_eq!(purchase.complete().unwrap_err(), StoreError::AlreadyVerified);
        assert_eq!(
            StoreError::AlreadyVerified.to_string(),
            "Purchase already verified"
        );
    }

    #[test]
    fn completed_is_terminal() {
        assert!(PurchaseStatus::Completed.is_terminal());
        assert!(PurchaseStatus::Pending.can_transition_to(&PurchaseStatus::Completed));
    }

    #[test]
    fn serializes_wire_enums() {
        let purchase = place(&[(item("Band", 1000.0, 4), 2)]).unwrap();
        let json = serde_json::to_value(&purchase).unwrap();
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["delivery_option"], "PICKUP");
        assert_eq!(json["total_amount"], 2000.0);
        assert_eq!(json["items"][0]["item_name"], "Band");
    }

    #[test]
    fn delivery_option_parses_case_insensitively() {
        assert_eq!("delivery".parse::<DeliveryOption>(), Ok(DeliveryOption::Delivery));
        assert!("drone".parse::<DeliveryOption>().is_err());
    }
}
