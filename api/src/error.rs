//! Endpoint error types using thiserror 2.0.

use faultfinder_session::{RequestError, SessionError};
use thiserror::Error;

/// Errors returned by the typed endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The exchange failed
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The response body did not match the expected shape
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        /// Request path
        path: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// A body was expected but the response had none
    #[error("Empty response body from {0}")]
    EmptyBody(String),

    /// The client could not be constructed
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type for endpoint calls.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create an empty body error.
    #[must_use]
    pub fn empty_body(path: impl Into<String>) -> Self {
        Self::EmptyBody(path.into())
    }

    /// The underlying request failure, if this is one.
    #[must_use]
    pub const fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the call failed because the session could not be restored.
    #[must_use]
    pub const fn is_session_expiry(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_session_expiry())
    }
}
