//! Transaction metadata exchanged with the gateway.
//!
//! We send metadata on initialize and read it back on verify and in webhooks.
//! The gateway echoes it as an object, but older dashboards and manual test
//! payloads deliver it JSON-encoded inside a string, so both are accepted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::foundation::{ClientId, PurchaseId};

/// What a transaction pays for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Membership,
    StorePurchase,
    /// Any tag we did not issue. Ignored by the webhook dispatcher.
    #[serde(other)]
    Unknown,
}

impl PaymentType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "membership" => PaymentType::Membership,
            "store_purchase" => PaymentType::StorePurchase,
            _ => PaymentType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Membership => "membership",
            PaymentType::StorePurchase => "store_purchase",
            PaymentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags attached to a gateway transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentMetadata {
    pub client_id: Option<String>,
    pub purchase_id: Option<String>,
    pub payment_type: Option<PaymentType>,
    pub amount_naira: Option<f64>,
    pub delivery_option: Option<String>,
}

impl PaymentMetadata {
    /// Metadata for a membership charge.
    pub fn membership(client_id: ClientId, amount_naira: f64) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            payment_type: Some(PaymentType::Membership),
            amount_naira: Some(amount_naira),
            ..Default::default()
        }
    }

    /// Metadata for a store checkout.
    pub fn store_purchase(
        client_id: ClientId,
        purchase_id: PurchaseId,
        delivery_option: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.to_string()),
            purchase_id: Some(purchase_id.to_string()),
            payment_type: Some(PaymentType::StorePurchase),
            delivery_option: Some(delivery_option.into()),
            ..Default::default()
        }
    }

    /// Reads metadata from whatever the gateway returned.
    ///
    /// Unknown shapes yield empty metadata rather than an error; callers
    /// decide which fields they require.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => Self::from_map(&map),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| -> Option<String> {
            match map.get(key)? {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };

        Self {
            client_id: text("client_id"),
            purchase_id: text("purchase_id"),
            payment_type: text("payment_type").map(|tag| PaymentType::from_tag(&tag)),
            amount_naira: map.get("amount_naira").and_then(Value::as_f64),
            delivery_option: text("delivery_option"),
        }
    }

    /// Serialises only the fields that are set.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(id) = &self.client_id {
            map.insert("client_id".into(), Value::String(id.clone()));
        }
        if let Some(id) = &self.purchase_id {
            map.insert("purchase_id".into(), Value::String(id.clone()));
        }
        if let Some(kind) = &self.payment_type {
            map.insert("payment_type".into(), Value::String(kind.as_str().into()));
        }
        if let Some(amount) = self.amount_naira {
            map.insert("amount_naira".into(), serde_json::json!(amount));
        }
        if let Some(option) = &self.delivery_option {
            map.insert("delivery_option".into(), Value::String(option.clone()));
        }
        Value::Object(map)
    }

    /// The client id, if present and well-formed.
    pub fn client_id(&self) -> Option<ClientId> {
        self.client_id.as_deref()?.parse().ok()
    }

    /// The purchase id, if present and well-formed.
    pub fn purchase_id(&self) -> Option<PurchaseId> {
        self.purchase_id.as_deref()?.parse().ok()
    }
}
