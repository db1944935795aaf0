//! Shared library for cross-cutting concerns in the Fault Finder client crates.
//!
//! This crate provides centralized implementations for:
//! - A common error type for infrastructure setup
//! - HTTP client configuration and building
//! - Tracing subscriber initialization
//! - Prometheus-style counters

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod metrics;
pub mod tracing_config;

pub use error::CommonError;
pub use http::{HttpConfig, build_http_client};
pub use metrics::Counter;
pub use tracing_config::{TracingConfig, init_tracing, try_init_tracing};
