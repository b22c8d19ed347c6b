//! Image uploads attached to signup, profile and store item requests.

use uuid::Uuid;

use crate::ports::{FileStorage, StorageError};

/// Folder for client profile pictures.
pub const PROFILE_IMAGES_FOLDER: &str = "profile-images";
/// Folder for store item pictures.
pub const STORE_ITEMS_FOLDER: &str = "store-items";
/// Folder for rendered check-in codes.
pub const QR_CODES_FOLDER: &str = "qr-codes";

/// A file received from a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Uploads under `{folder}/{uuid}-{sanitised name}` and returns the public URL.
pub async fn store_image(
    storage: &dyn FileStorage,
    folder: &str,
    upload: ImageUpload,
) -> Result<String, StorageError> {
    let path = upload_path(folder, &upload.file_name);
    storage.upload(&path, upload.bytes, &upload.content_type).await
}

pub fn upload_path(folder: &str, original_name: &str) -> String {
    format!("{}/{}-{}", folder, Uuid::new_v4(), sanitize_file_name(original_name))
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}
