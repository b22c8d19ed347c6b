//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Paystack settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Paystack secret key. Also the webhook signing key.
    pub paystack_secret_key: String,

    /// Where Paystack sends the payer after checkout
    pub paystack_callback_url: String,

    #[serde(default = "default_base_url")]
    pub paystack_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_test_")
    }

    pub fn is_live_mode(&self) -> bool {
        self.paystack_secret_key.starts_with("sk_live_")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.paystack_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PAYSTACK_SECRET_KEY"));
        }
        if !self.paystack_secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidPaystackKey);
        }
        if !self.paystack_callback_url.starts_with("http://")
            && !self.paystack_callback_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidCallbackUrl);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            paystack_secret_key: String::new(),
            paystack_callback_url: String::new(),
            paystack_base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.paystack.co".to_string()
}

fn default_timeout() -> u64 {
    30
}
