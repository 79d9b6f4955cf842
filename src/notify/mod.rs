//! Notification delivery abstractions.
//!
//! Delivery failures carry enough context to log but are always
//! isolated: one recipient's failure never stops the rest of a cycle.

pub mod console;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Recipient;

// Re-export for convenience
pub use console::ConsoleSink;

/// Delivers notification text to one recipient.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, recipient: &Recipient, text: &str) -> Result<()>;
}

/// Channel for failures that warrant operator attention.
#[async_trait]
pub trait OperatorChannel: Send + Sync {
    async fn alert(&self, text: &str) -> Result<()>;
}
