//! Authenticated request pipeline for the Fault Finder dashboard client.
//!
//! Every feature call goes through [`RequestPipeline::execute`]. The pipeline
//! sends the request, recognises the backend's "credentials were not provided"
//! 401, coordinates a single session refresh across all concurrent callers via
//! [`ReauthCoordinator`], retries the original request once, and publishes the
//! resulting [`AuthState`].
//!
//! ```text
//! feature call ──► RequestPipeline::execute
//!                    │
//!                    ├──► Transport::send ──► classify
//!                    │
//!                    ├──► (unauthorized session) ReauthCoordinator::ensure_fresh_session
//!                    │                              └──► Transport::send(refresh)
//!                    ├──► Transport::send (retry once)
//!                    │
//!                    └──► AuthState (mark authenticated / logged out)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod guard;
pub mod metrics;
pub mod pipeline;
pub mod request;
pub mod state;
pub mod transport;

pub use classify::{SESSION_EXPIRED_DETAIL, classify, parse_body};
pub use config::{ConfigError, SessionConfig};
pub use coordinator::{ReauthCoordinator, RefreshOutcome};
pub use error::{FailureKind, RequestError, RequestResult, SessionError, SessionResult};
pub use guard::{GuardDecision, RouteAccess};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use pipeline::RequestPipeline;
pub use request::{Method, Reply, Request};
pub use state::{AuthSnapshot, AuthState, AuthStateReader};
pub use transport::{HttpTransport, Transport};
