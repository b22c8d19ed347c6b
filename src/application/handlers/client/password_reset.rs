//! Forgot-password and reset-password flows.
//!
//! The reset token is a short-lived signed token carrying
//! `purpose = "reset-password"`; nothing is stored server side.

use serde::Serialize;
use std::sync::Arc;

use crate::application::notifications;
use crate::domain::client::{validate_password, ClientError};
use crate::domain::foundation::{AuthError, ClientId, UserRole};
use crate::ports::{ClientRepository, EmailSender, PasswordHasher, TokenClaims, TokenService};

const INVALID_RESET_TOKEN: &str = "Invalid or expired reset token";

#[derive(Debug, Clone)]
pub struct ForgotPasswordCommand {
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetMessage {
    pub message: String,
}

pub struct ForgotPasswordHandler {
    clients: Arc<dyn ClientRepository>,
    tokens: Arc<dyn TokenService>,
    email: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl ForgotPasswordHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        tokens: Arc<dyn TokenService>,
        email: Arc<dyn EmailSender>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            clients,
            tokens,
            email,
            frontend_url: frontend_url.into(),
        }
    }

    pub async fn handle(&self, cmd: ForgotPasswordCommand) -> Result<PasswordResetMessage, ClientError> {
        let client = self
            .clients
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(ClientError::not_found)?;

        let token = self
            .tokens
            .issue_reset_token(&TokenClaims::new(
                client.id().to_string(),
                client.email(),
                UserRole::Client,
            ))
            .map_err(|e| ClientError::infrastructure(e.to_string()))?;

        notifications::deliver(
            self.email.as_ref(),
            notifications::password_reset(&client, &self.frontend_url, &token),
            "password_reset",
        )
        .await;

        tracing::info!(client_id = %client.id(), "Password reset requested");
        Ok(PasswordResetMessage {
            message: "Password reset link has been sent to your email".to_string(),
        })
    }
}

pub struct ResetPasswordHandler {
    clients: Arc<dyn ClientRepository>,
    tokens: Arc<dyn TokenService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ResetPasswordHandler {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        tokens: Arc<dyn TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            clients,
            tokens,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<PasswordResetMessage, ClientError> {
        let claims = self
            .tokens
            .verify(&cmd.token)
            .map_err(|_: AuthError| ClientError::unauthorized(INVALID_RESET_TOKEN))?;
        if !claims.is_reset_token() || claims.user_type != UserRole::Client {
            return Err(ClientError::unauthorized(INVALID_RESET_TOKEN));
        }
        let client_id: ClientId = claims
            .sub
            .parse()
            .map_err(|_| ClientError::unauthorized(INVALID_RESET_TOKEN))?;

        validate_password(&cmd.password)?;

        let mut client = self
            .clients
            .find_by_id(&client_id)
            .await?
            .ok_or_else(ClientError::not_found)?;

        let hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| ClientError::infrastructure(e.to_string()))?;
        client.change_password_hash(hash);
        self.clients.update(&client).await?;

        tracing::info!(client_id = %client_id, "Password reset");
        Ok(PasswordResetMessage {
            message: "Password has been reset successfully".to_string(),
        })
    }
}
