//! Composition root.

use std::sync::Arc;

use faultfinder_session::{
    AuthState, AuthStateReader, HttpTransport, MetricsSnapshot, ReauthCoordinator,
    RequestPipeline, SessionConfig, SessionError, Transport,
};
use tracing::info;

use crate::auth::{AuthApi, User};
use crate::bootstrap;
use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::projects::ProjectApi;

/// The client-side service graph: one transport, one state, one coordinator
/// and one pipeline shared by every endpoint group.
pub struct Dashboard {
    state: AuthState,
    pipeline: Arc<RequestPipeline>,
    auth: AuthApi,
    projects: ProjectApi,
}

impl Dashboard {
    /// Build the graph over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP clients
    /// cannot be built.
    pub fn new(config: &SessionConfig) -> ApiResult<Self> {
        let transport = HttpTransport::new(config)?;
        info!(base_url = %config.base_url, "Dashboard client configured");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Build the graph from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds invalid values.
    pub fn from_env() -> ApiResult<Self> {
        let config = SessionConfig::from_env().map_err(SessionError::from)?;
        Self::new(&config)
    }

    /// Build the graph over any transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, config: &SessionConfig) -> Self {
        let state = AuthState::new();
        let coordinator = Arc::new(ReauthCoordinator::from_config(
            Arc::clone(&transport),
            config,
        ));
        let pipeline = Arc::new(RequestPipeline::new(transport, coordinator, state.clone()));
        let client = ApiClient::new(Arc::clone(&pipeline));

        Self {
            auth: AuthApi::new(client.clone(), state.clone()),
            projects: ProjectApi::new(client),
            state,
            pipeline,
        }
    }

    /// Reader for the published authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthStateReader {
        self.state.reader()
    }

    /// Authentication endpoints.
    #[must_use]
    pub const fn auth(&self) -> &AuthApi {
        &self.auth
    }

    /// Project endpoints.
    #[must_use]
    pub const fn projects(&self) -> &ProjectApi {
        &self.projects
    }

    /// Refresh and retry counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.pipeline.metrics().snapshot()
    }

    /// Run the startup identity check.
    pub async fn initial_load(&self) -> Option<User> {
        bootstrap::initial_load(&self.auth, &self.state).await
    }
}
