//! Payment gateway port.
//!
//! Defines the contract for the hosted-checkout payment API. Amounts cross
//! this boundary in minor units (kobo).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{Money, Timestamp};
use crate::domain::payment::{generate_reference, PaymentMetadata};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a transaction and obtain a hosted checkout link.
    async fn initialize_transaction(
        &self,
        request: InitializeTransaction,
    ) -> Result<CheckoutHandle, PaymentError>;

    /// Look up the outcome of a transaction by reference.
    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError>;

    /// True iff `signature` authenticates `payload` as a gateway callback.
    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool;

    /// New reference of the form `{prefix}_{unix_millis}_{token}`.
    fn generate_reference(&self, prefix: &str) -> String {
        generate_reference(prefix)
    }
}

/// Request to start a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InitializeTransaction {
    pub email: String,
    pub amount: Money,
    pub reference: String,
    pub metadata: PaymentMetadata,
}

/// Where to send the payer to complete checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutHandle {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Gateway's view of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionVerification {
    /// Whether the gateway API call itself succeeded.
    pub api_status: bool,
    /// Transaction status as reported by the gateway ("success", "failed", ...).
    pub status: String,
    pub reference: String,
    /// Amount charged, in minor units.
    pub amount_minor: i64,
    pub paid_at: Option<Timestamp>,
    /// Raw metadata echoed back by the gateway.
    pub metadata: Value,
}

impl TransactionVerification {
    pub fn is_successful(&self) -> bool {
        self.api_status && self.status == "success"
    }

    pub fn metadata(&self) -> PaymentMetadata {
        PaymentMetadata::from_value(&self.metadata)
    }

    /// Amount charged, or `None` for a negative value.
    pub fn amount(&self) -> Option<Money> {
        Money::from_minor(self.amount_minor).ok()
    }

    pub fn receipt(&self) -> PaymentReceipt {
        PaymentReceipt {
            reference: self.reference.clone(),
            amount: self.amount(),
            paid_at: self.paid_at,
        }
    }
}

/// The charge as echoed back to API callers after verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: Option<Money>,
    pub paid_at: Option<Timestamp>,
}

/// Payment gateway error.
///
/// `message` is safe to show to API callers. Gateway detail is logged by the
/// adapter and never placed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
    /// Gateway's own error code or HTTP status, if any.
    pub provider_code: Option<String>,
    pub retryable: bool,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,
    /// Gateway rejected the request or returned something unusable.
    ProviderError,
    RateLimitExceeded,
}

impl PaymentErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verification(api_status: bool, status: &str) -> TransactionVerification {
        TransactionVerification {
            api_status,
            status: status.to_string(),
            reference: "membership_1_abc".into(),
            amount_minor: 500_000,
            paid_at: None,
            metadata: json!({"client_id": "x", "payment_type": "membership"}),
        }
    }

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn success_requires_api_status_and_transaction_status() {
        assert!(verification(true, "success").is_successful());
        assert!(!verification(false, "success").is_successful());
        assert!(!verification(true, "abandoned").is_successful());
    }

    #[test]
    fn amount_converts_from_minor_units() {
        assert_eq!(verification(true, "success").amount().unwrap().to_major(), 5000.0);
    }

    #[test]
    fn network_errors_are_retryable() {
        assert!(PaymentError::network("timeout").retryable);
        assert!(!PaymentError::provider("bad key").retryable);
        assert_eq!(
            PaymentError::provider("Failed to verify payment").to_string(),
            "provider_error: Failed to verify payment"
        );
    }
}
