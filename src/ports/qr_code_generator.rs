//! QR code rendering port.

use thiserror::Error;

/// A rendered image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("QR code rendering failed: {0}")]
pub struct QrCodeError(pub String);

pub trait QrCodeGenerator: Send + Sync {
    fn render(&self, content: &str) -> Result<RenderedImage, QrCodeError>;
}
