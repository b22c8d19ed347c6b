//! Store catalogue items.

use serde::Serialize;

use crate::domain::foundation::{Money, StoreItemId, Timestamp, ValidationError};

use super::StoreError;

/// A sellable item.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `price` is greater than zero
/// - `quantity` is never set below zero through `new` or `apply`; it can only
///   go negative through an unguarded stock withdrawal after payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreItem {
    id: StoreItemId,
    name: String,
    description: Option<String>,
    price: Money,
    quantity: i32,
    is_active: bool,
    image_url: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Input for creating an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStoreItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub quantity: i32,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i32>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

impl StoreItem {
    pub fn new(input: NewStoreItem) -> Result<Self, StoreError> {
        let now = Timestamp::now();
        Ok(Self {
            id: StoreItemId::new(),
            name: validate_name(&input.name)?,
            description: input.description.filter(|d| !d.trim().is_empty()),
            price: validate_price(input.price)?,
            quantity: validate_quantity(input.quantity)?,
            is_active: input.is_active.unwrap_or(true),
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an item from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: StoreItemId,
        name: String,
        description: Option<String>,
        price: Money,
        quantity: i32,
        is_active: bool,
        image_url: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            quantity,
            is_active,
            image_url,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &StoreItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Validates every change before applying any of them.
    pub fn apply(&mut self, changes: StoreItemChanges) -> Result<(), StoreError> {
        let name = changes.name.as_deref().map(validate_name).transpose()?;
        let price = changes.price.map(validate_price).transpose()?;
        let quantity = changes.quantity.map(validate_quantity).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        if let Some(active) = changes.is_active {
            self.is_active = active;
        }
        if let Some(url) = changes.image_url {
            self.image_url = Some(url);
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Checks that `requested` units can be ordered right now.
    pub fn ensure_orderable(&self, requested: u32) -> Result<(), StoreError> {
        if !self.is_active {
            return Err(StoreError::item_unavailable(&self.name));
        }
        if i64::from(self.quantity) < i64::from(requested) {
            return Err(StoreError::insufficient_stock(&self.name, self.quantity));
        }
        Ok(())
    }

    /// Removes sold units. Not bounded at zero; returns the new quantity.
    pub fn withdraw(&mut self, sold: u32) -> i32 {
        let sold = i32::try_from(sold).unwrap_or(i32::MAX);
        self.quantity = self.quantity.saturating_sub(sold);
        self.updated_at = Timestamp::now();
        self.quantity
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Money) -> Result<Money, ValidationError> {
    if price.is_zero() {
        return Err(ValidationError::invalid_format("price", "must be greater than zero"));
    }
    Ok(price)
}

fn validate_quantity(quantity: i32) -> Result<i32, ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::too_small("quantity", 0, i64::from(quantity)));
    }
    Ok(quantity)
}
