//! Transport seam and the reqwest-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use faultfinder_common::{HttpConfig, build_http_client};
use reqwest::Client;
use reqwest::cookie::Jar;
use tracing::{debug, instrument};
use url::Url;

use crate::classify::{classify, parse_body};
use crate::config::SessionConfig;
use crate::error::{RequestError, RequestResult, SessionResult};
use crate::request::Request;

/// Performs one HTTP exchange.
///
/// Implementations classify the response but never retry and know nothing
/// about sessions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and classify the response.
    async fn send(&self, request: &Request) -> RequestResult;
}

/// Transport over `reqwest`.
///
/// Requests that include credentials share one cookie jar, so the session
/// cookies set by login and refresh responses are replayed on later calls.
pub struct HttpTransport {
    base_url: Url,
    with_credentials: Client,
    anonymous: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a client cannot be
    /// built.
    pub fn new(config: &SessionConfig) -> SessionResult<Self> {
        Self::with_cookie_jar(config, Arc::new(Jar::default()))
    }

    /// Create a transport that stores cookies in `jar`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a client cannot be
    /// built.
    pub fn with_cookie_jar(config: &SessionConfig, jar: Arc<Jar>) -> SessionResult<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http = HttpConfig::default()
            .with_timeout(config.request_timeout)
            .with_user_agent(config.user_agent.clone());

        Ok(Self {
            base_url,
            with_credentials: build_http_client(&http.clone().with_cookie_jar(jar))?,
            anonymous: build_http_client(&http)?,
        })
    }

    /// Resolve a request path against the base URL.
    ///
    /// The base URL's own path is kept, so `/auth/user/` against
    /// `https://host/api` becomes `https://host/api/auth/user/`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the joined URL does not parse.
    pub fn resolve(&self, path: &str) -> Result<Url, RequestError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| RequestError::transport(format!("invalid request URL for {path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    async fn send(&self, request: &Request) -> RequestResult {
        let url = self.resolve(request.path())?;
        let client = if request.includes_credentials() {
            &self.with_credentials
        } else {
            &self.anonymous
        };

        let mut builder = client.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, bytes = text.len(), "Response received");

        classify(status, parse_body(&text))
    }
}
