//! Mock session validator for tests.
//!
//! Maps fixed token strings to principals so HTTP tests can authenticate
//! without signing real tokens.
//!
//! # Example
//!
//! ```ignore
//! use gym_portal::adapters::auth::MockSessionValidator;
//! use gym_portal::domain::foundation::{AuthenticatedUser, ClientId};
//!
//! let validator = MockSessionValidator::new()
//!     .with_user("client-token", AuthenticatedUser::client(ClientId::new(), "ada@gym.ng"));
//!
//! let result = validator.validate("client-token").await;
//! assert!(result.is_ok());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AdminId, AuthError, AuthenticatedUser, ClientId};
use crate::ports::SessionValidator;

/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Adds a client principal under `token`.
    pub fn with_client(self, token: impl Into<String>, id: ClientId) -> Self {
        let user = AuthenticatedUser::client(id, format!("client-{}@test.example.com", id));
        self.with_user(token, user)
    }

    /// Adds an admin principal under `token`.
    pub fn with_admin(self, token: impl Into<String>, id: AdminId) -> Self {
        let user = AuthenticatedUser::admin(id, format!("admin-{}@test.example.com", id));
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
