//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ClientNotFound | 404 |
//! | AlreadyActive | 400 |
//! | VerificationFailed | 400 |
//! | InvalidMetadata | 400 |
//! | PaymentFailed | 400 |
//! | InvalidState | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ClientId, DomainError, ErrorCode};

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The client does not exist.
    ClientNotFound(ClientId),

    /// A payment was started for a membership that is already active.
    AlreadyActive(ClientId),

    /// The gateway did not report a successful charge.
    VerificationFailed,

    /// The verified transaction carried no usable client id.
    InvalidMetadata,

    /// The gateway call itself failed.
    PaymentFailed { reason: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn client_not_found(id: ClientId) -> Self {
        MembershipError::ClientNotFound(id)
    }

    pub fn already_active(id: ClientId) -> Self {
        MembershipError::AlreadyActive(id)
    }

    pub fn verification_failed() -> Self {
        MembershipError::VerificationFailed
    }

    pub fn invalid_metadata() -> Self {
        MembershipError::InvalidMetadata
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        MembershipError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::ClientNotFound(_) => ErrorCode::ClientNotFound,
            MembershipError::AlreadyActive(_) => ErrorCode::MembershipAlreadyActive,
            MembershipError::VerificationFailed | MembershipError::PaymentFailed { .. } => {
                ErrorCode::PaymentFailed
            }
            MembershipError::InvalidMetadata => ErrorCode::InvalidPaymentMetadata,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::ClientNotFound(_) => "Client not found".to_string(),
            MembershipError::AlreadyActive(_) => {
                "Client already has an active membership".to_string()
            }
            MembershipError::VerificationFailed => "Payment verification failed".to_string(),
            MembershipError::InvalidMetadata => "Invalid payment metadata".to_string(),
            MembershipError::PaymentFailed { reason } => reason.clone(),
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => MembershipError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failure_uses_gateway_wording() {
        let err = MembershipError::verification_failed();
        assert_eq!(err.message(), "Payment verification failed");
        assert_eq!(err.code(), ErrorCode::PaymentFailed);
    }

    #[test]
    fn invalid_metadata_message() {
        assert_eq!(
            MembershipError::invalid_metadata().to_string(),
            "Invalid payment metadata"
        );
    }

    #[test]
    fn payment_failed_passes_reason_through() {
        let err = MembershipError::payment_failed("Failed to initialize payment");
        assert_eq!(err.message(), "Failed to initialize payment");
    }

    #[test]
    fn domain_validation_error_keeps_field() {
        let domain = DomainError::validation("amount", "must be positive");
        let err: MembershipError = domain.into();
        assert!(matches!(
            err,
            MembershipError::ValidationFailed { ref field, .. } if field == "amount"
        ));
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: MembershipError = DomainError::database("connection reset").into();
        assert!(matches!(err, MembershipError::Infrastructure(_)));
    }

    #[test]
    fn converts_back_into_domain_error() {
        let err: DomainError = MembershipError::already_active(ClientId::new()).into();
        assert_eq!(err.code, ErrorCode::MembershipAlreadyActive);
    }
}
