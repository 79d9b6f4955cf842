// src/services/monitor.rs

//! Monitoring cycle service.
//!
//! One cycle: read the grouped subscription state, fetch each distinct
//! branch once, evaluate openings per subscribed course, and dispatch
//! notifications. A branch failure is isolated from the rest of the
//! cycle; a delivery failure is isolated from other recipients.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{Config, ScheduleSnapshot};
use crate::notify::{NotificationSink, OperatorChannel};
use crate::services::evaluate::find_openings;
use crate::services::fetcher::ScheduleSource;
use crate::store::SubscriptionStore;

/// Summary of one monitoring cycle.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub branch_total: usize,
    pub branch_failures: usize,
    pub openings: usize,
    pub notifications_sent: usize,
    pub delivery_failures: usize,
}

impl CycleOutcome {
    fn begin(branch_total: usize) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            branch_total,
            branch_failures: 0,
            openings: 0,
            notifications_sent: 0,
            delivery_failures: 0,
        }
    }

    fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }
}

/// Executes monitoring cycles over the subscription state.
pub struct SeatMonitor {
    config: Arc<Config>,
    source: Arc<dyn ScheduleSource>,
    store: Arc<dyn SubscriptionStore>,
    sink: Arc<dyn NotificationSink>,
    operator: Arc<dyn OperatorChannel>,
}

impl SeatMonitor {
    /// Create a monitor over explicit collaborators.
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn ScheduleSource>,
        store: Arc<dyn SubscriptionStore>,
        sink: Arc<dyn NotificationSink>,
        operator: Arc<dyn OperatorChannel>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            sink,
            operator,
        }
    }

    /// Execute one monitoring cycle.
    ///
    /// Subscription state is re-read on every call; a store error aborts
    /// the cycle early and surfaces to the loop as the cycle fault.
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let grouped = self.store.active_subscriptions().await?;
        if grouped.is_empty() {
            log::info!("No active subscriptions, skipping cycle.");
            return Ok(CycleOutcome::begin(0).finish());
        }

        let concurrency = self.config.fetch.max_concurrent.max(1);
        let mut outcome = CycleOutcome::begin(grouped.len());

        // One fetch per distinct branch, bounded against the shared remote.
        let mut branches = stream::iter(grouped)
            .map(|(branch_id, courses)| async move {
                let result = self.source.fetch(branch_id).await;
                (branch_id, courses, result)
            })
            .buffer_unordered(concurrency);

        while let Some((branch_id, courses, result)) = branches.next().await {
            match result {
                Ok(snapshot) => {
                    self.notify_openings(branch_id, &courses, &snapshot, &mut outcome)
                        .await?;
                }
                Err(error) => {
                    outcome.branch_failures += 1;
                    log::warn!("Branch {} fetch failed: {}", branch_id, error);
                    if let Err(alert_error) = self.operator.alert(&error.to_string()).await {
                        log::warn!("Operator alert failed: {}", alert_error);
                    }
                }
            }
        }

        Ok(outcome.finish())
    }

    /// Evaluate one branch snapshot and fan out notifications.
    async fn notify_openings(
        &self,
        branch_id: u32,
        courses: &HashSet<String>,
        snapshot: &ScheduleSnapshot,
        outcome: &mut CycleOutcome,
    ) -> Result<()> {
        for course_code in courses {
            let openings = find_openings(snapshot, course_code);
            if openings.is_empty() {
                continue;
            }

            let recipients = self.store.subscribers_of(course_code, branch_id).await?;
            for opening in openings {
                outcome.openings += 1;
                let text = opening.format(&self.config.monitor.message_template);
                for recipient in &recipients {
                    match self.sink.send(recipient, &text).await {
                        Ok(()) => outcome.notifications_sent += 1,
                        Err(error) => {
                            outcome.delivery_failures += 1;
                            log::warn!("Delivery to {} failed: {}", recipient.address, error);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
