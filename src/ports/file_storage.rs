//! Object storage port for uploaded images and generated QR codes.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `bytes` at `path`, replacing any existing object, and returns
    /// its public URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
