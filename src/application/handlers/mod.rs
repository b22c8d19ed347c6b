//! Application handlers.
//!
//! Command and query handlers, grouped by the area of the gym they serve:
//!
//! - `auth` - credential checks and login for clients and admins
//! - `client` - signup, profiles, the client directory, password reset
//! - `admin` - dashboard statistics, bootstrap admin
//! - `membership` - membership checkout, verification and status
//! - `store` - catalogue and purchases
//! - `webhook` - gateway callback dispatch

pub mod admin;
pub mod auth;
pub mod client;
pub mod membership;
pub mod store;
pub mod webhook;

#[cfg(test)]
pub mod test_support;
