//! Single-flight session refresh.
//!
//! The first caller that needs a refresh becomes the leader and installs a
//! shared future in the in-flight slot; every caller that arrives while the
//! slot is occupied awaits that same future and receives the same
//! [`RefreshOutcome`]. The future clears the slot itself once the outcome is
//! known, so the next contention window starts a fresh exchange.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::SessionConfig;
use crate::metrics::PipelineMetrics;
use crate::request::{Method, Request};
use crate::transport::Transport;

/// Result of one refresh exchange, observed by every caller of its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The backend issued a new session
    Succeeded,
    /// The refresh was rejected, errored or timed out
    Failed,
}

impl RefreshOutcome {
    /// Whether the refresh succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

type Flight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Serializes session refreshes.
pub struct ReauthCoordinator {
    transport: Arc<dyn Transport>,
    refresh_request: Request,
    refresh_timeout: Duration,
    inflight: Arc<Mutex<Option<Flight>>>,
    metrics: Arc<PipelineMetrics>,
}

impl ReauthCoordinator {
    /// Create a coordinator that refreshes via `POST refresh_path`.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        refresh_path: impl Into<String>,
        refresh_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            refresh_request: Request::new(Method::POST, refresh_path),
            refresh_timeout,
            inflight: Arc::new(Mutex::new(None)),
            metrics: Arc::new(PipelineMetrics::default()),
        }
    }

    /// Create a coordinator from configuration.
    #[must_use]
    pub fn from_config(transport: Arc<dyn Transport>, config: &SessionConfig) -> Self {
        Self::new(transport, config.refresh_path.clone(), config.refresh_timeout)
    }

    /// Make sure the session has just been refreshed.
    ///
    /// If a refresh is already in flight this waits for it and returns its
    /// outcome; otherwise it performs exactly one refresh exchange.
    #[instrument(skip(self))]
    pub async fn ensure_fresh_session(&self) -> RefreshOutcome {
        let flight = {
            let mut slot = self.inflight.lock().await;
            if let Some(flight) = slot.as_ref() {
                debug!("Joining in-flight session refresh");
                self.metrics.refresh_joins.inc();
                flight.clone()
            } else {
                let flight = self.start_refresh();
                *slot = Some(flight.clone());
                flight
            }
        };

        flight.await
    }

    /// Wait for an in-flight refresh, if any, to settle.
    pub async fn wait_for_settle(&self) {
        let flight = self.inflight.lock().await.clone();
        if let Some(flight) = flight {
            debug!("Waiting for in-flight session refresh before sending");
            flight.await;
        }
    }

    /// Whether a refresh is currently in flight.
    pub async fn is_refreshing(&self) -> bool {
        self.inflight.lock().await.is_some()
    }

    /// Counters shared with the pipeline.
    #[must_use]
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the shared refresh future. Must be called with the slot locked.
    fn start_refresh(&self) -> Flight {
        let transport = Arc::clone(&self.transport);
        let request = self.refresh_request.clone();
        let timeout = self.refresh_timeout;
        let slot = Arc::clone(&self.inflight);
        let metrics = Arc::clone(&self.metrics);

        async move {
            metrics.refresh_exchanges.inc();
            info!(path = %request.path(), "Refreshing session");

            let outcome = match tokio::time::timeout(timeout, transport.send(&request)).await {
                Ok(Ok(reply)) if reply.has_body() => RefreshOutcome::Succeeded,
                Ok(Ok(reply)) => {
                    warn!(status = reply.status, "Session refresh returned no body");
                    RefreshOutcome::Failed
                }
                Ok(Err(err)) => {
                    warn!(error = %err, "Session refresh rejected");
                    RefreshOutcome::Failed
                }
                Err(_) => {
                    warn!(timeout = ?timeout, "Session refresh timed out");
                    RefreshOutcome::Failed
                }
            };

            if outcome.is_success() {
                info!("Session refreshed");
            } else {
                metrics.refresh_failures.inc();
            }

            slot.lock().await.take();
            outcome
        }
        .boxed()
        .shared()
    }
}
