//! Access token issuance port.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, UserRole};

/// Purpose claim carried by password reset tokens.
pub const RESET_PASSWORD_PURPOSE: &str = "reset-password";

/// Claims embedded in every token we issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Record id of the client or admin.
    pub sub: String,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserRole,
    /// Set only on single-purpose tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl TokenClaims {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, user_type: UserRole) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            user_type,
            purpose: None,
        }
    }

    pub fn is_reset_token(&self) -> bool {
        self.purpose.as_deref() == Some(RESET_PASSWORD_PURPOSE)
    }
}

pub trait TokenService: Send + Sync {
    /// Access token with the default lifetime.
    fn issue(&self, claims: &TokenClaims) -> Result<String, AuthError>;

    /// Short-lived token with `purpose = "reset-password"`.
    fn issue_reset_token(&self, claims: &TokenClaims) -> Result<String, AuthError>;

    /// Checks signature and expiry and returns the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
