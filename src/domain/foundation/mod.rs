//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the gym domain.

mod auth;
mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, UserRole};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdminId, ClientId, PurchaseId, PurchaseItemId, StoreItemId};
pub use money::{Money, MINOR_UNITS_PER_MAJOR};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
