//! Login for clients and admins.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::admin::AdminProfile;
use crate::domain::client::ClientProfile;
use crate::domain::foundation::{AuthError, UserRole};
use crate::ports::{TokenClaims, TokenService};

use super::CredentialsValidator;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientLoginResult {
    pub access_token: String,
    pub client: ClientProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginResult {
    pub access_token: String,
    pub admin: AdminProfile,
}

pub struct LoginHandler {
    credentials: Arc<CredentialsValidator>,
    tokens: Arc<dyn TokenService>,
}

impl LoginHandler {
    pub fn new(credentials: Arc<CredentialsValidator>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    pub async fn login_client(&self, cmd: LoginCommand) -> Result<ClientLoginResult, AuthError> {
        let client = self
            .credentials
            .validate_client(&cmd.email, &cmd.password)
            .await?;
        let access_token = self.tokens.issue(&TokenClaims::new(
            client.id().to_string(),
            client.email(),
            UserRole::Client,
        ))?;
        tracing::info!(client_id = %client.id(), "Client logged in");
        Ok(ClientLoginResult {
            access_token,
            client: client.profile(),
        })
    }

    pub async fn login_admin(&self, cmd: LoginCommand) -> Result<AdminLoginResult, AuthError> {
        let admin = self
            .credentials
            .validate_admin(&cmd.email, &cmd.password)
            .await?;
        let access_token = self.tokens.issue(&TokenClaims::new(
            admin.id().to_string(),
            admin.email(),
            UserRole::Admin,
        ))?;
        tracing::info!(admin_id = %admin.id(), "Admin logged in");
        Ok(AdminLoginResult {
            access_token,
            admin: admin.profile(),
        })
    }
}
