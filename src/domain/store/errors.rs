//! Store and purchase errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ItemNotFound, PurchaseNotFound, ClientNotFound | 404 |
//! | MembershipRequired, Forbidden | 403 |
//! | Conflict | 409 |
//! | everything else except Infrastructure | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, StoreItemId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Item lookup by id failed. `Some` when the id came from an order line.
    ItemNotFound(Option<StoreItemId>),
    PurchaseNotFound,
    ClientNotFound,

    /// Only active members may buy.
    MembershipRequired,

    /// Authenticated, but not the purchase owner.
    Forbidden(String),

    EmptyOrder,
    DeliveryAddressRequired,
    ItemUnavailable { name: String },
    InsufficientStock { name: String, available: i32 },

    /// Second verification of the same purchase.
    AlreadyVerified,

    /// The gateway did not report a successful charge.
    VerificationFailed,

    /// The verified transaction carried no usable purchase id.
    InvalidMetadata,

    /// The gateway call itself failed.
    PaymentFailed { reason: String },

    /// The change would break a reference held by another record.
    Conflict(String),

    InvalidState { current: String, attempted: String },
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl StoreError {
    pub fn item_not_found() -> Self {
        StoreError::ItemNotFound(None)
    }

    pub fn ordered_item_not_found(id: StoreItemId) -> Self {
        StoreError::ItemNotFound(Some(id))
    }

    pub fn item_unavailable(name: impl Into<String>) -> Self {
        StoreError::ItemUnavailable { name: name.into() }
    }

    pub fn insufficient_stock(name: impl Into<String>, available: i32) -> Self {
        StoreError::InsufficientStock {
            name: name.into(),
            available,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        StoreError::Forbidden(message.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        StoreError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        StoreError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        StoreError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::ItemNotFound(_) => ErrorCode::StoreItemNotFound,
            StoreError::PurchaseNotFound => ErrorCode::PurchaseNotFound,
            StoreError::ClientNotFound => ErrorCode::ClientNotFound,
            StoreError::MembershipRequired => ErrorCode::MembershipRequired,
            StoreError::Forbidden(_) => ErrorCode::Forbidden,
            StoreError::EmptyOrder => ErrorCode::ValidationFailed,
            StoreError::DeliveryAddressRequired => ErrorCode::DeliveryAddressRequired,
            StoreError::ItemUnavailable { .. } => ErrorCode::ItemUnavailable,
            StoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            StoreError::AlreadyVerified => ErrorCode::PurchaseAlreadyVerified,
            StoreError::VerificationFailed | StoreError::PaymentFailed { .. } => {
                ErrorCode::PaymentFailed
            }
            StoreError::InvalidMetadata => ErrorCode::InvalidPaymentMetadata,
            StoreError::Conflict(_) => ErrorCode::Conflict,
            StoreError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            StoreError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            StoreError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            StoreError::ItemNotFound(None) => "Store item not found".to_string(),
            StoreError::ItemNotFound(Some(id)) => format!("Store item with ID {} not found", id),
            StoreError::PurchaseNotFound => "Purchase not found".to_string(),
            StoreError::ClientNotFound => "Client not found".to_string(),
            StoreError::MembershipRequired => {
                "Active membership required to make purchases".to_string()
            }
            StoreError::Forbidden(msg) => msg.clone(),
            StoreError::EmptyOrder => "At least one item is required".to_string(),
            StoreError::DeliveryAddressRequired => {
                "Delivery address is required for delivery option".to_string()
            }
            StoreError::ItemUnavailable { name } => format!("Store item {} is not available", name),
            StoreError::InsufficientStock { name, available } => {
                format!("Insufficient quantity for {}. Available: {}", name, available)
            }
            StoreError::AlreadyVerified => "Purchase already verified".to_string(),
            StoreError::VerificationFailed => "Payment verification failed".to_string(),
            StoreError::InvalidMetadata => "Invalid payment metadata".to_string(),
            StoreError::PaymentFailed { reason } => reason.clone(),
            StoreError::Conflict(msg) => msg.clone(),
            StoreError::InvalidState { current, attempted } => {
                format!("Cannot {} purchase in {} state", attempted, current)
            }
            StoreError::ValidationFailed { message, .. } => message.clone(),
            StoreError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => StoreError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::StoreItemNotFound => StoreError::ItemNotFound(None),
            ErrorCode::PurchaseNotFound => StoreError::PurchaseNotFound,
            ErrorCode::ClientNotFound => StoreError::ClientNotFound,
            ErrorCode::Conflict => StoreError::Conflict(err.message),
            _ => StoreError::Infrastructure(err.to_string()),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
