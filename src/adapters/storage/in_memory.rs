//! In-Memory File Storage Adapter
//!
//! Keeps uploaded objects in a map. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{FileStorage, StorageError};

use super::object_path::validate_object_path;

const PUBLIC_BASE: &str = "https://storage.test/public";

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    fail_uploads: Arc<RwLock<bool>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Public URL an object at `path` would be served from.
    pub fn public_url(path: &str) -> String {
        format!("{}/{}", PUBLIC_BASE, path)
    }

    pub async fn fail_uploads(&self, fail: bool) {
        *self.fail_uploads.write().await = fail;
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if !validate_object_path(path) {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        if *self.fail_uploads.read().await {
            return Err(StorageError::UploadFailed("simulated outage".to_string()));
        }
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(Self::public_url(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_overwrites_and_returns_public_url() {
        let storage = InMemoryFileStorage::new();
        let url = storage
            .upload("profile-images/a.png", vec![1, 2], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "https://storage.test/public/profile-images/a.png");

        storage
            .upload("profile-images/a.png", vec![3], "image/png")
            .await
            .unwrap();
        assert_eq!(storage.get("profile-images/a.png").await.unwrap().bytes, vec![3]);
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let storage = InMemoryFileStorage::new();
        storage.upload("x/y.svg", vec![0], "image/svg+xml").await.unwrap();
        storage.delete("x/y.svg").await.unwrap();
        assert!(storage.paths().await.is_empty());
    }

    #[tokio::test]
    async fn simulated_failure() {
        let storage = InMemoryFileStorage::new();
        storage.fail_uploads(true).await;
        assert!(matches!(
            storage.upload("x/y.svg", vec![0], "image/svg+xml").await,
            Err(StorageError::UploadFailed(_))
        ));
    }
}
