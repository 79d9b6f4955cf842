//! Subscription data structures.

use serde::{Deserialize, Serialize};

/// A user's interest in seat openings for one course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    /// User identity
    pub user_id: i64,

    /// Delivery address understood by the notification sink
    pub address: String,

    /// Normalized course code (e.g. "EHB 313E")
    pub course_code: String,

    /// Branch the course belongs to
    pub branch_id: u32,
}

/// Delivery target for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub user_id: i64,
    pub address: String,
}

impl From<&Subscription> for Recipient {
    fn from(subscription: &Subscription) -> Self {
        Self {
            user_id: subscription.user_id,
            address: subscription.address.clone(),
        }
    }
}
