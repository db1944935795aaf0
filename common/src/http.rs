//! Centralized HTTP client configuration and building.
//!
//! Every transport in the workspace builds its `reqwest` client here so that
//! timeouts, user agent and cookie handling stay consistent.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, ClientBuilder};

use crate::CommonError;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout (default: 30s)
    pub timeout: Duration,
    /// Connection timeout (default: 10s)
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Cookie jar shared by every client that sends credentials
    pub cookie_jar: Option<Arc<Jar>>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: "fault-finder-client/0.1".to_string(),
            cookie_jar: None,
        }
    }
}

impl HttpConfig {
    /// Create a new HTTP config with custom timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a new HTTP config with custom user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Attach a cookie jar. Clients built from this config store and replay
    /// cookies through it.
    #[must_use]
    pub fn with_cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }
}

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns an error if the user agent is empty or the client cannot be built
/// (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use faultfinder_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig::default().with_timeout(Duration::from_secs(60));
/// let client = build_http_client(&config).expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, CommonError> {
    if config.user_agent.trim().is_empty() {
        return Err(CommonError::invalid_input("user agent must not be empty"));
    }

    let mut builder = ClientBuilder::new()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(&config.user_agent)
        .use_rustls_tls();

    if let Some(jar) = &config.cookie_jar {
        builder = builder.cookie_provider(Arc::clone(jar));
    }

    Ok(builder.build()?)
}
