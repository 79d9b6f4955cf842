//! Subscription store abstractions.
//!
//! The monitoring pipeline is a read-only consumer: it re-reads the
//! grouped subscription state every cycle (so command-surface changes
//! take effect on the next pass) and never mutates the store.

pub mod memory;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Recipient, Subscription};

// Re-export for convenience
pub use memory::MemoryStore;

/// Read contract the pipeline consumes.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// All active subscriptions grouped as branch -> distinct course codes.
    async fn active_subscriptions(&self) -> Result<HashMap<u32, HashSet<String>>>;

    /// Recipients subscribed to one (course, branch) pair.
    async fn subscribers_of(&self, course_code: &str, branch_id: u32) -> Result<Vec<Recipient>>;
}

/// On-disk seed format for local runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionFile {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}
