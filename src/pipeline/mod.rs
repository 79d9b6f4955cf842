//! Pipeline entry points for monitor operations.
//!
//! - `run_monitor`: Poll subscribed branches and dispatch notifications

pub mod monitor;

pub use monitor::run_monitor;
