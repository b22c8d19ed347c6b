//! Email adapters.
//!
//! - `resend` - Resend REST API
//! - `recording` - in-memory sender for tests and local runs

mod recording;
mod resend;

pub use recording::RecordingEmailSender;
pub use resend::ResendEmailSender;
