//! Paystack payment gateway adapter.
//!
//! Implements `PaymentGateway` against the Paystack transactions API.
//!
//! # Errors
//!
//! Gateway failures are logged with full detail and surfaced to callers as
//! "Failed to initialize payment" or "Failed to verify payment".

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::WebhookSignatureVerifier;
use crate::ports::{
    CheckoutHandle, InitializeTransaction, PaymentError, PaymentErrorCode, PaymentGateway,
    TransactionVerification,
};

use super::api_types::{Envelope, InitializeData, InitializeRequest, VerifyData};

pub const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";

const INITIALIZE_FAILED: &str = "Failed to initialize payment";
const VERIFY_FAILED: &str = "Failed to verify payment";

/// Paystack API configuration.
#[derive(Clone)]
pub struct PaystackConfig {
    secret_key: SecretString,
    callback_url: String,
    base_url: String,
    timeout: Duration,
}

impl PaystackConfig {
    pub fn new(secret_key: SecretString, callback_url: impl Into<String>) -> Self {
        Self {
            secret_key,
            callback_url: callback_url.into(),
            base_url: DEFAULT_PAYSTACK_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("secret_key", &"[REDACTED]")
            .field("callback_url", &self.callback_url)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub struct PaystackGateway {
    config: PaystackConfig,
    http_client: reqwest::Client,
    verifier: WebhookSignatureVerifier,
}

impl PaystackGateway {
    pub fn new(config: PaystackConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let verifier = WebhookSignatureVerifier::new(config.secret_key.expose_secret());
        Self {
            config,
            http_client,
            verifier,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize_transaction(
        &self,
        request: InitializeTransaction,
    ) -> Result<CheckoutHandle, PaymentError> {
        let body = InitializeRequest {
            email: &request.email,
            amount: request.amount.minor(),
            reference: &request.reference,
            metadata: request.metadata.to_value(),
            callback_url: &self.config.callback_url,
        };

        let response = self
            .http_client
            .post(self.url("/transaction/initialize"))
            .bearer_auth(self.config.secret_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, reference = %request.reference, "Paystack initialize request failed");
                PaymentError::network(INITIALIZE_FAILED)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                reference = %request.reference,
                "Paystack initialize rejected"
            );
            return Err(PaymentError::provider(INITIALIZE_FAILED)
                .with_provider_code(status.as_u16().to_string()));
        }

        let envelope: Envelope<InitializeData> = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Paystack initialize response");
            PaymentError::provider(INITIALIZE_FAILED)
        })?;

        match envelope.data {
            Some(data) if envelope.status => {
                tracing::info!(reference = %data.reference, "Paystack transaction initialized");
                Ok(CheckoutHandle {
                    authorization_url: data.authorization_url,
                    access_code: data.access_code,
                    reference: data.reference,
                })
            }
            _ => {
                tracing::error!(message = %envelope.message, "Paystack initialize returned failure");
                Err(PaymentError::provider(INITIALIZE_FAILED))
            }
        }
    }

    async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaymentError> {
        let response = self
            .http_client
            .get(self.url(&format!("/transaction/verify/{}", reference)))
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, reference, "Paystack verify request failed");
                PaymentError::network(VERIFY_FAILED)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, reference, "Paystack verify rejected");
            let code = if status == reqwest::StatusCode::UNAUTHORIZED {
                PaymentErrorCode::AuthenticationError
            } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                PaymentErrorCode::RateLimitExceeded
            } else {
                PaymentErrorCode::ProviderError
            };
            return Err(PaymentError::new(code, VERIFY_FAILED)
                .with_provider_code(status.as_u16().to_string()));
        }

        let envelope: Envelope<VerifyData> = response.json().await.map_err(|e| {
            tracing::error!(error = %e, reference, "Failed to parse Paystack verify response");
            PaymentError::provider(VERIFY_FAILED)
        })?;

        let Some(data) = envelope.data else {
            tracing::error!(message = %envelope.message, reference, "Paystack verify returned no data");
            return Err(PaymentError::provider(VERIFY_FAILED));
        };

        Ok(TransactionVerification {
            api_status: envelope.status,
            status: data.status,
            reference: data.reference,
            amount_minor: data.amount,
            paid_at: data.paid_at.as_deref().and_then(Timestamp::parse_rfc3339),
            metadata: data.metadata,
        })
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.verifier.verify(payload, signature)
    }
}
