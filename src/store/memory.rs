//! In-process subscription store.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Recipient, Subscription};
use crate::store::{SubscriptionFile, SubscriptionStore};

/// In-memory subscription store.
///
/// Mutations come from the command surface; the lock serializes them
/// while pipeline reads share it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing subscriptions.
    pub fn from_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions: RwLock::new(subscriptions),
        }
    }

    /// Load a store seeded from a TOML subscription file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: SubscriptionFile = toml::from_str(&content)?;
        Ok(Self::from_subscriptions(file.subscriptions))
    }

    /// Add a subscription.
    ///
    /// Returns false when the user already tracks that course.
    pub fn add(&self, subscription: Subscription) -> bool {
        let mut subscriptions = self.write_lock();
        let duplicate = subscriptions.iter().any(|existing| {
            existing.user_id == subscription.user_id
                && existing.course_code == subscription.course_code
        });
        if duplicate {
            return false;
        }
        subscriptions.push(subscription);
        true
    }

    /// Remove a user's subscription to one course.
    ///
    /// Returns false when no such subscription existed.
    pub fn remove(&self, user_id: i64, course_code: &str) -> bool {
        let mut subscriptions = self.write_lock();
        let before = subscriptions.len();
        subscriptions
            .retain(|s| !(s.user_id == user_id && s.course_code == course_code));
        subscriptions.len() != before
    }

    /// All subscriptions of one user, for listing.
    pub fn courses_of(&self, user_id: i64) -> Vec<Subscription> {
        self.read_lock()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Total subscription count.
    pub fn count(&self) -> usize {
        self.read_lock().len()
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, Vec<Subscription>> {
        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn active_subscriptions(&self) -> Result<HashMap<u32, HashSet<String>>> {
        let mut grouped: HashMap<u32, HashSet<String>> = HashMap::new();
        for subscription in self.read_lock().iter() {
            grouped
                .entry(subscription.branch_id)
                .or_default()
                .insert(subscription.course_code.clone());
        }
        Ok(grouped)
    }

    async fn subscribers_of(&self, course_code: &str, branch_id: u32) -> Result<Vec<Recipient>> {
        Ok(self
            .read_lock()
            .iter()
            .filter(|s| s.course_code == course_code && s.branch_id == branch_id)
            .map(Recipient::from)
            .collect())
    }
}
