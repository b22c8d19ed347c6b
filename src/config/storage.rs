//! Object storage configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase Storage settings for profile and product images.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SUPABASE_URL"));
        }
        if !self.supabase_url.starts_with("https://") && !self.supabase_url.starts_with("http://") {
            return Err(ValidationError::InvalidStorageUrl);
        }
        if self.supabase_service_key.is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SUPABASE_SERVICE_KEY"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            bucket: default_bucket(),
        }
    }
}

fn default_bucket() -> String {
    "gym-portal".to_string()
}
