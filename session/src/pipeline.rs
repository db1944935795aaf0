//! Request execution with transparent session recovery.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::coordinator::{ReauthCoordinator, RefreshOutcome};
use crate::error::{RequestError, RequestResult};
use crate::metrics::PipelineMetrics;
use crate::request::Request;
use crate::state::{AuthState, AuthStateReader};
use crate::transport::Transport;

/// Runs logical requests against the backend.
///
/// A request that comes back as an unauthorized session triggers one
/// coordinated refresh and is then replayed exactly once. The pipeline is the
/// only component that updates [`AuthState`] for ordinary requests.
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    coordinator: Arc<ReauthCoordinator>,
    state: AuthState,
    metrics: Arc<PipelineMetrics>,
}

impl RequestPipeline {
    /// Create a pipeline over an existing coordinator.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        coordinator: Arc<ReauthCoordinator>,
        state: AuthState,
    ) -> Self {
        let metrics = coordinator.metrics();
        Self {
            transport,
            coordinator,
            state,
            metrics,
        }
    }

    /// Create a pipeline and its coordinator from configuration.
    #[must_use]
    pub fn from_config(
        transport: Arc<dyn Transport>,
        config: &SessionConfig,
        state: AuthState,
    ) -> Self {
        let coordinator = Arc::new(ReauthCoordinator::from_config(
            Arc::clone(&transport),
            config,
        ));
        Self::new(transport, coordinator, state)
    }

    /// Execute one logical request.
    ///
    /// # Errors
    ///
    /// Returns the classified failure. After a failed refresh this is the
    /// original unauthorized-session error; after a successful refresh it is
    /// whatever the replay produced.
    #[instrument(
        skip(self, request),
        fields(
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.path(),
        )
    )]
    pub async fn execute(&self, request: &Request) -> RequestResult {
        self.coordinator.wait_for_settle().await;

        match self.transport.send(request).await {
            Err(err) if err.is_session_expiry() => self.recover(request, err).await,
            result => {
                self.state.mark_authenticated();
                result
            }
        }
    }

    #[instrument(skip_all)]
    async fn recover(&self, request: &Request, original: RequestError) -> RequestResult {
        debug!("Session expired, requesting refresh");

        match self.coordinator.ensure_fresh_session().await {
            RefreshOutcome::Succeeded => {
                self.state.mark_authenticated();
                self.metrics.retried_requests.inc();

                let retried = self.transport.send(request).await;
                if matches!(&retried, Err(err) if err.is_session_expiry()) {
                    warn!("Request still unauthorized after session refresh");
                }
                retried
            }
            RefreshOutcome::Failed => {
                self.state.mark_logged_out();
                Err(original)
            }
        }
    }

    /// Reader for the published authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthStateReader {
        self.state.reader()
    }

    /// The coordinator used for refreshes.
    #[must_use]
    pub const fn coordinator(&self) -> &Arc<ReauthCoordinator> {
        &self.coordinator
    }

    /// Counters for refreshes and retries.
    #[must_use]
    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }
}
