//! Supabase Storage adapter.
//!
//! Objects are written with `x-upsert: true` so re-uploading a path replaces
//! it. The bucket must be public for the returned URLs to resolve.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::ports::{FileStorage, StorageError};

use super::object_path::validate_object_path;

pub const DEFAULT_BUCKET: &str = "gym-portal";

#[derive(Clone)]
pub struct SupabaseStorageConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    pub service_key: SecretString,
    pub bucket: String,
}

impl SupabaseStorageConfig {
    pub fn new(url: impl Into<String>, service_key: SecretString) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_key,
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
}

impl std::fmt::Debug for SupabaseStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStorageConfig")
            .field("url", &self.url)
            .field("service_key", &"[REDACTED]")
            .field("bucket", &self.bucket)
            .finish()
    }
}

pub struct SupabaseStorage {
    config: SupabaseStorageConfig,
    http_client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseStorageConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            config,
            http_client,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, path
        )
    }

    /// Public URL of an object in the bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url, self.config.bucket, path
        )
    }
}

#[async_trait]
impl FileStorage for SupabaseStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if !validate_object_path(path) {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        let response = self
            .http_client
            .post(self.object_url(path))
            .bearer_auth(self.config.service_key.expose_secret())
            .header("apikey", self.config.service_key.expose_secret())
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path, "Storage upload request failed");
                StorageError::UploadFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, path, "Storage upload rejected");
            return Err(StorageError::UploadFailed(format!("status {}", status)));
        }

        tracing::debug!(path, "Uploaded object");
        Ok(self.public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        if !validate_object_path(path) {
            return Err(StorageError::InvalidPath(path.to_string()));
        }

        let response = self
            .http_client
            .delete(self.object_url(path))
            .bearer_auth(self.config.service_key.expose_secret())
            .header("apikey", self.config.service_key.expose_secret())
            .send()
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::DeleteFailed(format!(
                "status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
