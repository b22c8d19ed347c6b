//! SVG check-in codes via the `qrcode` crate.

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::ports::{QrCodeError, QrCodeGenerator, RenderedImage};

const MIN_DIMENSION: u32 = 300;

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgQrCodeGenerator;

impl SvgQrCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl QrCodeGenerator for SvgQrCodeGenerator {
    fn render(&self, content: &str) -> Result<RenderedImage, QrCodeError> {
        let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)
            .map_err(|e| QrCodeError(e.to_string()))?;
        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(RenderedImage {
            bytes: image.into_bytes(),
            content_type: "image/svg+xml",
            extension: "svg",
        })
    }
}

/// Renders a placeholder SVG that embeds the content as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeQrCodeGenerator;

impl QrCodeGenerator for FakeQrCodeGenerator {
    fn render(&self, content: &str) -> Result<RenderedImage, QrCodeError> {
        let svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>{}</text></svg>",
            content
        );
        Ok(RenderedImage {
            bytes: svg.into_bytes(),
            content_type: "image/svg+xml",
            extension: "svg",
        })
    }
}
