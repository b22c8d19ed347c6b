//! Application configuration module
//!
//! Configuration is read from environment variables with the `GYM_PORTAL`
//! prefix; nested values are separated by double underscores. A `.env` file
//! is honoured in development.
//!
//! # Example
//!
//! ```no_run
//! use gym_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod payment;
mod server;
mod storage;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Token signing and bootstrap admin
    pub auth: AuthConfig,

    /// Paystack
    pub payment: PaymentConfig,

    /// Resend
    pub email: EmailConfig,

    /// Supabase Storage
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `GYM_PORTAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `GYM_PORTAL__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GYM_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.email.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const REQUIRED: &[(&str, &str)] = &[
        ("GYM_PORTAL__DATABASE__URL", "postgresql://gym@localhost/gym"),
        ("GYM_PORTAL__AUTH__JWT_SECRET", "dev-secret"),
        ("GYM_PORTAL__PAYMENT__PAYSTACK_SECRET_KEY", "sk_test_xxx"),
        (
            "GYM_PORTAL__PAYMENT__PAYSTACK_CALLBACK_URL",
            "http://localhost:3000/payment/callback",
        ),
        ("GYM_PORTAL__EMAIL__RESEND_API_KEY", "re_xxx"),
        ("GYM_PORTAL__EMAIL__ADMIN_EMAIL", "owner@gym.ng"),
        ("GYM_PORTAL__STORAGE__SUPABASE_URL", "https://abc.supabase.co"),
        ("GYM_PORTAL__STORAGE__SUPABASE_SERVICE_KEY", "service-key"),
    ];

    const OPTIONAL: &[&str] = &[
        "GYM_PORTAL__SERVER__PORT",
        "GYM_PORTAL__SERVER__ENVIRONMENT",
        "GYM_PORTAL__AUTH__BOOTSTRAP_ADMIN_EMAIL",
        "GYM_PORTAL__AUTH__BOOTSTRAP_ADMIN_PASSWORD",
    ];

    fn set_minimal_env() {
        for (key, value) in REQUIRED {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in REQUIRED {
            env::remove_var(key);
        }
        for key in OPTIONAL {
            env::remove_var(key);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://gym@localhost/gym");
        assert_eq!(config.email.admin_email, "owner@gym.ng");
        assert_eq!(config.storage.bucket, "gym-portal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_custom_server_port() {
        let config = load_with(&[("GYM_PORTAL__SERVER__PORT", "3000")]).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let config = load_with(&[("GYM_PORTAL__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn test_bootstrap_admin_loaded() {
        let config = load_with(&[
            ("GYM_PORTAL__AUTH__BOOTSTRAP_ADMIN_EMAIL", "owner@gym.ng"),
            ("GYM_PORTAL__AUTH__BOOTSTRAP_ADMIN_PASSWORD", "changeme123"),
        ])
        .unwrap();
        assert_eq!(
            config.auth.bootstrap_admin(),
            Some(("owner@gym.ng", "changeme123"))
        );
    }
}
