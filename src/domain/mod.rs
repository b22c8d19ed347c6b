//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `client` - Gym members and their profiles
//! - `admin` - Admin accounts and the dashboard read model
//! - `membership` - Paid membership period and status
//! - `store` - Catalogue items and purchases
//! - `payment` - Gateway references, metadata and webhook verification

pub mod admin;
pub mod client;
pub mod foundation;
pub mod membership;
pub mod payment;
pub mod store;
