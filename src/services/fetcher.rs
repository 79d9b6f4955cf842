// src/services/fetcher.rs

//! Branch fetcher service.
//!
//! Issues one request per branch against the schedule service and turns
//! the response into a `ScheduleSnapshot`, preferring the structured
//! feed and falling back to the markup table on schema mismatch.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{Config, ScheduleSnapshot};
use crate::services::parse::{parse_feed, parse_table};
use crate::utils::{http, snippet};

/// Graphemes of response body carried in fetch error messages.
const SNIPPET_GRAPHEMES: usize = 200;

/// Source of branch schedule snapshots.
///
/// The seam between the orchestrator and the network; tests substitute
/// an in-process implementation.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Retrieve and parse the schedule for one branch.
    async fn fetch(&self, branch_id: u32) -> Result<ScheduleSnapshot>;
}

/// Fetches branch schedules from the remote schedule service.
pub struct BranchFetcher {
    config: Arc<Config>,
    client: Client,
}

impl BranchFetcher {
    /// Create a fetcher with a configured HTTP client.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = http::create_client(&config.fetch)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ScheduleSource for BranchFetcher {
    async fn fetch(&self, branch_id: u32) -> Result<ScheduleSnapshot> {
        let branch = branch_id.to_string();
        let response = self
            .client
            .get(&self.config.fetch.endpoint)
            .query(&[
                (
                    "ProgramSeviyeTipiAnahtari",
                    self.config.fetch.program_level.as_str(),
                ),
                ("dersBransKoduId", branch.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::fetch(branch_id, None, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(branch_id, Some(status.as_u16()), e))?;

        if !status.is_success() {
            return Err(AppError::fetch(
                branch_id,
                Some(status.as_u16()),
                format!(
                    "status {}: {}",
                    status,
                    snippet(&body, SNIPPET_GRAPHEMES)
                ),
            ));
        }

        match parse_feed(&body, branch_id) {
            Ok(snapshot) => Ok(snapshot),
            Err(error) => {
                log::debug!(
                    "structured parse failed for branch {} ({}), trying table fallback",
                    branch_id,
                    error
                );
                Ok(parse_table(&body, branch_id))
            }
        }
    }
}
