// src/models/mod.rs

//! Domain models for the seat monitor.

mod config;
mod section;
mod snapshot;
mod subscription;

// Re-export all public types
pub use config::{BranchInfo, Config, FetchConfig, MonitorConfig};
pub use section::Section;
pub use snapshot::ScheduleSnapshot;
pub use subscription::{Recipient, Subscription};
