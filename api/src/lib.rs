//! Typed Fault Finder endpoints.
//!
//! Every call goes through the session pipeline, so an expired session is
//! refreshed and the call replayed without the caller noticing. [`Dashboard`]
//! wires the whole graph from a [`SessionConfig`](faultfinder_session::SessionConfig).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod projects;

pub use auth::{AuthApi, LoginCredentials, Registration, User};
pub use bootstrap::initial_load;
pub use client::ApiClient;
pub use dashboard::Dashboard;
pub use error::{ApiError, ApiResult};
pub use projects::{Project, ProjectApi, ProjectDetail, ProjectDraft, format_short_date};
