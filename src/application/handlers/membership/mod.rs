//! Membership billing handlers.
//!
//! ## Commands
//! - Starting a membership checkout
//! - Verifying a membership payment (client call or webhook)
//!
//! ## Queries
//! - Membership status, with lazy expiry

mod get_status;
mod initialize_payment;
mod verify_payment;

// Commands
pub use initialize_payment::{InitializePaymentCommand, InitializePaymentHandler};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};

// Queries
pub use get_status::{GetMembershipStatusHandler, GetMembershipStatusQuery};
