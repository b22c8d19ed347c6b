//! Multipart form parsing for the image-carrying endpoints.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

use crate::application::uploads::ImageUpload;

use super::error::ApiError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Text fields plus at most one uploaded file.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    file: Option<ImageUpload>,
}

impl FormData {
    /// Reads the whole form. The part named `file_field` is taken as the upload;
    /// an empty file part counts as no upload.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let file_name = field.file_name().unwrap_or(file_field).to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid upload: {}", e)))?;
                if !bytes.is_empty() {
                    form.file = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid field '{}': {}", name, e)))?;
            form.fields.insert(name, value);
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn required(&self, name: &str) -> Result<String, ApiError> {
        self.text(name)
            .ok_or_else(|| missing(name))
    }

    /// Parses an optional field, rejecting values that do not parse.
    pub fn parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>, ApiError> {
        match self.fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| invalid(name, raw)),
            None => Ok(None),
        }
    }

    /// Booleans arrive as "true"/"false" strings from form posts.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, ApiError> {
        match self.fields.get(name).map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "true" || v == "1" => Ok(Some(true)),
            Some(v) if v == "false" || v == "0" => Ok(Some(false)),
            Some(v) if v.is_empty() => Ok(None),
            Some(v) => Err(invalid(name, &v)),
            None => Ok(None),
        }
    }

    pub fn take_file(&mut self) -> Option<ImageUpload> {
        self.file.take()
    }
}

fn missing(name: &str) -> ApiError {
    ApiError::bad_request(format!("Field '{}' is required", name)).with_detail("field", name)
}

fn invalid(name: &str, value: &str) -> ApiError {
    ApiError::bad_request(format!("Field '{}' has invalid value '{}'", name, value))
        .with_detail("field", name)
}
