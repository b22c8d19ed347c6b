//! Authentication types for the domain layer.
//!
//! These types represent a principal extracted from a bearer token. They have
//! no dependency on the token format; the `SessionValidator` port populates
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::{AdminId, ClientId};

/// Which directory a principal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Client => write!(f, "client"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Authenticated principal extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Record id of the client or admin.
    pub id: Uuid,

    /// Email address carried in the token claims.
    pub email: String,

    /// Directory the id refers to.
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn client(id: ClientId, email: impl Into<String>) -> Self {
        Self {
            id: *id.as_uuid(),
            email: email.into(),
            role: UserRole::Client,
        }
    }

    pub fn admin(id: AdminId, email: impl Into<String>) -> Self {
        Self {
            id: *id.as_uuid(),
            email: email.into(),
            role: UserRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The client id, if this principal is a client.
    pub fn client_id(&self) -> Option<ClientId> {
        match self.role {
            UserRole::Client => Some(ClientId::from_uuid(self.id)),
            UserRole::Admin => None,
        }
    }

    /// The admin id, if this principal is an admin.
    pub fn admin_id(&self) -> Option<AdminId> {
        match self.role {
            UserRole::Admin => Some(AdminId::from_uuid(self.id)),
            UserRole::Client => None,
        }
    }

    /// True for the client itself or for any admin.
    pub fn can_access_client(&self, client_id: &ClientId) -> bool {
        self.is_admin() || self.client_id().as_ref() == Some(client_id)
    }
}

/// Authentication errors.
///
/// These describe what went wrong from the application's perspective, not the
/// token library's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the principal no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// Authenticated, but not allowed to perform this action.
    #[error("{0}")]
    Forbidden(String),

    /// Hashing or signing failed.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}
