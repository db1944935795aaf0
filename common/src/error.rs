//! Centralized error type for infrastructure setup.
//!
//! Failures here happen while wiring the client together (building the HTTP
//! client, installing the tracing subscriber), never while serving a request.

use thiserror::Error;

/// Common error type for setup operations.
#[derive(Error, Debug)]
pub enum CommonError {
    /// The HTTP client could not be built
    #[error("HTTP client build failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// A global tracing subscriber was already installed
    #[error("Tracing initialization failed: {0}")]
    Tracing(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CommonError {
    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a tracing error with the given message.
    #[must_use]
    pub fn tracing(msg: impl Into<String>) -> Self {
        Self::Tracing(msg.into())
    }
}
