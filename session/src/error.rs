//! Pipeline error types using thiserror 2.0.
//!
//! [`RequestError`] is the failure half of every exchange result. It is an
//! expected outcome, returned as a value and never raised as a fault.
//! [`SessionError`] covers construction-time contract violations.

use faultfinder_common::CommonError;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::request::Reply;

/// Coarse classification of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network, DNS or timeout failure; no response was received
    Transport,
    /// 4xx other than an expired session
    Client,
    /// 401 carrying the "credentials were not provided" detail
    UnauthorizedSession,
    /// 5xx
    Server,
}

/// A failed exchange.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// No response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server rejected the request
    #[error("Client error: status {status}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Parsed response body, if any
        body: Option<Value>,
    },

    /// The server reported that no credentials were supplied
    #[error("Unauthorized session: authentication credentials were not provided")]
    UnauthorizedSession {
        /// Parsed response body
        body: Option<Value>,
    },

    /// The server failed to process the request
    #[error("Server error: status {status}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Parsed response body, if any
        body: Option<Value>,
    },
}

/// Result of a single exchange or pipeline execution.
pub type RequestResult = Result<Reply, RequestError>;

impl RequestError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// The failure kind.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Client { .. } => FailureKind::Client,
            Self::UnauthorizedSession { .. } => FailureKind::UnauthorizedSession,
            Self::Server { .. } => FailureKind::Server,
        }
    }

    /// Whether this failure can be recovered by refreshing the session.
    #[must_use]
    pub const fn is_session_expiry(&self) -> bool {
        matches!(self, Self::UnauthorizedSession { .. })
    }

    /// HTTP status code, when a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(_) => None,
            Self::UnauthorizedSession { .. } => Some(401),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
        }
    }

    /// Parsed response body, when a response was received.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        match self {
            Self::Transport(_) => None,
            Self::Client { body, .. }
            | Self::UnauthorizedSession { body }
            | Self::Server { body, .. } => body.as_ref(),
        }
    }

    /// Human-readable detail: the body's `detail` string when present,
    /// otherwise the transport message.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Transport(msg) => Some(msg.as_str()),
            _ => self
                .body()
                .and_then(|body| body.get("detail"))
                .and_then(Value::as_str),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Construction-time errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Shared infrastructure failed to initialise
    #[error(transparent)]
    Common(#[from] CommonError),
}

/// Result type for construction operations.
pub type SessionResult<T> = Result<T, SessionError>;
