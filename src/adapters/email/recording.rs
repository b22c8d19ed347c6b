//! Email sender that keeps messages in memory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{EmailError, EmailMessage, EmailSender};

#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail: Arc<RwLock<bool>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail.
    pub async fn fail_sends(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }

    pub async fn subjects(&self) -> Vec<String> {
        self.sent.read().await.iter().map(|m| m.subject.clone()).collect()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if *self.fail.read().await {
            return Err(EmailError::Transport("simulated outage".to_string()));
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}
