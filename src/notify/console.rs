//! Log-backed sink for local runs.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Recipient;
use crate::notify::{NotificationSink, OperatorChannel};

/// Writes notifications and operator alerts to the process log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn send(&self, recipient: &Recipient, text: &str) -> Result<()> {
        log::info!(
            "notification for {} (user {}):\n{}",
            recipient.address,
            recipient.user_id,
            text
        );
        Ok(())
    }
}

#[async_trait]
impl OperatorChannel for ConsoleSink {
    async fn alert(&self, text: &str) -> Result<()> {
        log::error!("operator alert: {}", text);
        Ok(())
    }
}
