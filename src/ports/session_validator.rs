//! Session validation port for bearer tokens.
//!
//! HTTP middleware hands the raw bearer token to a `SessionValidator` and
//! receives the principal it belongs to. Implementations must:
//!
//! - Validate the token signature and expiry
//! - Refuse single-purpose tokens (password reset) as sessions
//! - Confirm the principal still exists

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed, badly signed or wrong-purpose tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::UserNotFound` when the client or admin was deleted
/// - `AuthError::ServiceUnavailable` when the lookup fails
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
