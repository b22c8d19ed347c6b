//! Paystack payment gateway adapter.
//!
//! Implements the `PaymentGateway` port:
//! - Transaction initialization (hosted checkout)
//! - Transaction verification
//! - Webhook signature verification (HMAC-SHA512, constant-time)
//!
//! The secret key is held as `secrecy::SecretString`.

mod api_types;
mod mock_gateway;
mod paystack_adapter;

pub use mock_gateway::{MockPaymentGateway, MOCK_GATEWAY_SECRET};
pub use paystack_adapter::{PaystackConfig, PaystackGateway, DEFAULT_PAYSTACK_BASE_URL};
