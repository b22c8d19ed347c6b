//! Payment vocabulary shared by membership billing and the store.
//!
//! - `reference` - gateway transaction references
//! - `metadata` - the tags we attach to a transaction and read back
//! - `webhook_event` - inbound gateway callbacks
//! - `webhook_verifier` - HMAC-SHA512 signature check

mod metadata;
mod reference;
mod webhook_errors;
mod webhook_event;
mod webhook_verifier;

pub use metadata::{PaymentMetadata, PaymentType};
pub use reference::{generate_reference, MEMBERSHIP_REFERENCE_PREFIX, PURCHASE_REFERENCE_PREFIX};
pub use webhook_errors::WebhookError;
pub use webhook_event::{GatewayEvent, GatewayEventData, CHARGE_SUCCESS_EVENT};
pub use webhook_verifier::{WebhookSignatureVerifier, SIGNATURE_HEADER};
