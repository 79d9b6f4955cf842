// src/error.rs

//! Unified error handling for the seat monitor.

use std::fmt;

use thiserror::Error;

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured feed did not match the expected schema
    #[error("Feed parse error: {0}")]
    Parse(String),

    /// Branch fetch failed (network or non-success status)
    #[error("Fetch error for branch {branch_id}: {message}")]
    Fetch {
        branch_id: u32,
        /// HTTP status when the server answered, None on network-level failure
        status: Option<u16>,
        message: String,
    },

    /// Notification delivery failed for one recipient
    #[error("Delivery error for {recipient}: {message}")]
    Delivery { recipient: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a feed parse error.
    pub fn parse(message: impl fmt::Display) -> Self {
        Self::Parse(message.to_string())
    }

    /// Create a fetch error for a branch.
    pub fn fetch(branch_id: u32, status: Option<u16>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            branch_id,
            status,
            message: message.to_string(),
        }
    }

    /// Create a delivery error with recipient context.
    pub fn delivery(recipient: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Delivery {
            recipient: recipient.into(),
            message: message.to_string(),
        }
    }
}
