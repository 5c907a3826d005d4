//! Application error types
//!
//! Errors raised while starting or running the server, outside any single
//! request. Request failures are rendered by the API layer into
//! [`ErrorResponse`].

use serde::Serialize;

/// Startup and listener failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connecting to or migrating the store failed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Listener error: {0}")]
    Listener(#[from] std::io::Error),
}

impl AppError {
    /// Wrap a storage failure seen during startup
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Body of the `error` member in every failure response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Result type alias for startup operations
pub type AppResult<T> = Result<T, AppError>;
