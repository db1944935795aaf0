//! Shared test utilities for the Fault Finder client crates.
//!
//! This crate provides:
//! - A scripted [`Transport`](faultfinder_session::Transport) for driving the pipeline
//! - Proptest generators for statuses, bodies and request paths
//! - Test fixtures with sample backend payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{RecordedCall, ScriptedTransport};
