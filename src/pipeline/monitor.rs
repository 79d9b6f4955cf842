// src/pipeline/monitor.rs

//! Monitoring loop entry point.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::Result;
use crate::models::Config;
use crate::notify::{NotificationSink, OperatorChannel};
use crate::services::{BranchFetcher, SeatMonitor};
use crate::store::SubscriptionStore;

/// Run the monitoring loop until the host signals shutdown.
///
/// Alternates between running one cycle and sleeping: the normal poll
/// interval after a completed cycle, the shorter backoff after a cycle
/// fault. A cycle fault never terminates the loop; shutdown is honored
/// between cycles only.
pub async fn run_monitor(
    config: Arc<Config>,
    store: Arc<dyn SubscriptionStore>,
    sink: Arc<dyn NotificationSink>,
    operator: Arc<dyn OperatorChannel>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let fetcher = BranchFetcher::new(Arc::clone(&config))?;
    let monitor = SeatMonitor::new(
        Arc::clone(&config),
        Arc::new(fetcher),
        store,
        sink,
        operator,
    );

    let interval = Duration::from_secs(config.monitor.poll_interval_secs);
    let backoff = Duration::from_secs(config.monitor.error_backoff_secs);

    log::info!(
        "Seat monitor started (interval {}s, backoff {}s).",
        config.monitor.poll_interval_secs,
        config.monitor.error_backoff_secs
    );

    loop {
        let pause = match monitor.run_cycle().await {
            Ok(outcome) => {
                log::info!(
                    "Cycle complete: {} branches ({} failed), {} openings, {} sent ({} failed).",
                    outcome.branch_total,
                    outcome.branch_failures,
                    outcome.openings,
                    outcome.notifications_sent,
                    outcome.delivery_failures
                );
                interval
            }
            Err(error) => {
                log::error!("Cycle aborted: {}. Backing off.", error);
                backoff
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(pause) => {}
            _ = shutdown.changed() => {
                log::info!("Shutdown requested, stopping monitor.");
                return Ok(());
            }
        }
    }
}
