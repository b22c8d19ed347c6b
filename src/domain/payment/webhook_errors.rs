//! Errors raised while handling gateway callbacks.
//!
//! None of these reach the gateway. The dispatcher logs them and acknowledges
//! the delivery, so the status code only matters for the signature check.

use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// Signature header missing or not matching the payload.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body was not a gateway event.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required metadata field missing from the event.
    #[error("Missing metadata: {0}")]
    MissingMetadata(&'static str),

    /// Event was intentionally ignored (not an error condition).
    #[error("Event ignored: {0}")]
    Ignored(String),

    /// The routed verification rejected the event.
    #[error("Verification failed: {0}")]
    Verification(String),
}

impl WebhookError {
    /// True for outcomes that are expected in normal operation.
    ///
    /// Duplicate deliveries and events for other integrations end up here and
    /// are logged at a lower level.
    pub fn is_benign(&self) -> bool {
        matches!(self, WebhookError::Ignored(_))
    }
}
