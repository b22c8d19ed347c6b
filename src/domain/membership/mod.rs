//! Membership domain module.
//!
//! Handles the paid membership period attached to every client and the
//! status that gates store purchases.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership value carried on the client record
//! - `status` - MembershipStatus state machine
//! - `errors` - MembershipError

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Membership, MembershipSnapshot, MEMBERSHIP_PERIOD_DAYS};
pub use errors::MembershipError;
pub use status::MembershipStatus;
