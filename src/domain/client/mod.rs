//! Client directory.
//!
//! - `aggregate` - Client record and its public profile
//! - `errors` - ClientError

mod aggregate;
mod errors;

pub use aggregate::{
    normalize_email, validate_password, Client, ClientProfile, ProfileChanges,
    MIN_PASSWORD_LENGTH,
};
pub use errors::ClientError;
