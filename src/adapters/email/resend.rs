//! Resend email adapter.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{EmailError, EmailMessage, EmailSender, Recipient};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

pub struct ResendEmailSender {
    api_key: SecretString,
    /// Formatted "Name <address>" sender.
    from: String,
    admin_email: String,
    api_url: String,
    http_client: reqwest::Client,
}

impl ResendEmailSender {
    pub fn new(api_key: SecretString, from: impl Into<String>, admin_email: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_key,
            from: from.into(),
            admin_email: admin_email.into(),
            api_url: RESEND_API_URL.to_string(),
            http_client,
        }
    }

    /// Point at a different endpoint (for testing).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    fn address<'a>(&'a self, recipient: &'a Recipient) -> &'a str {
        match recipient {
            Recipient::Address(address) => address,
            Recipient::Admin => &self.admin_email,
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let to = self.address(&message.to);
        let body = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected(format!("{}: {}", status, error_text)));
        }

        tracing::info!(subject = %message.subject, "Email sent");
        Ok(())
    }
}
