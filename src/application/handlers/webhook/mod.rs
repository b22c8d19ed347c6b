//! Payment gateway webhook handling.

mod dispatch;

pub use dispatch::{DispatchWebhookCommand, DispatchWebhookHandler, WebhookOutcome, WebhookReply};
