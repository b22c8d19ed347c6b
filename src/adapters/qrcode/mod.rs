//! QR code adapters.

mod svg;

pub use svg::{FakeQrCodeGenerator, SvgQrCodeGenerator};
