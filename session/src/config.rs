//! Session pipeline configuration with validation.
//!
//! Values come from [`SessionConfig::default`], the builder methods, or the
//! environment via [`SessionConfig::from_env`].

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://api.fault-finder.me";

/// Default session refresh path, relative to the base URL.
pub const DEFAULT_REFRESH_PATH: &str = "auth/token/refresh/";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Offending field or variable
        field: String,
        /// Parser message
        reason: String,
    },

    /// Timeout must be greater than zero
    #[error("Invalid timeout for {0}: must be greater than 0")]
    InvalidTimeout(String),

    /// Refresh path must be a non-empty relative path
    #[error("Invalid refresh path: {0}")]
    InvalidRefreshPath(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },
}

/// Session pipeline configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API base URL
    pub base_url: String,
    /// Refresh endpoint path, relative to `base_url`
    pub refresh_path: String,
    /// Timeout for ordinary requests
    pub request_timeout: Duration,
    /// Upper bound on a single refresh exchange
    pub refresh_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            request_timeout: Duration::from_secs(30),
            refresh_timeout: Duration::from_secs(10),
            user_agent: "fault-finder-dashboard/0.1".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Loads configuration from environment variables with validation.
    ///
    /// Reads `FAULT_FINDER_API_URL`, `FAULT_FINDER_REFRESH_PATH`,
    /// `FAULT_FINDER_REQUEST_TIMEOUT` and `FAULT_FINDER_REFRESH_TIMEOUT`
    /// (seconds). A `.env` file is honoured when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            base_url: env::var("FAULT_FINDER_API_URL").unwrap_or(defaults.base_url),
            refresh_path: env::var("FAULT_FINDER_REFRESH_PATH").unwrap_or(defaults.refresh_path),
            request_timeout: Duration::from_secs(parse_env("FAULT_FINDER_REQUEST_TIMEOUT", 30)?),
            refresh_timeout: Duration::from_secs(parse_env("FAULT_FINDER_REFRESH_TIMEOUT", 10)?),
            user_agent: defaults.user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set refresh timeout.
    #[must_use]
    pub const fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    /// Set refresh path.
    #[must_use]
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Set user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first rule the configuration violates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("request_timeout".to_string()));
        }
        if self.refresh_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("refresh_timeout".to_string()));
        }
        let path = self.refresh_path.trim();
        if path.trim_start_matches('/').is_empty() || path.contains("://") {
            return Err(ConfigError::InvalidRefreshPath(self.refresh_path.clone()));
        }
        Ok(())
    }

    /// Parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            field: "base_url".to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                field: "base_url".to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(url)
    }
}

/// Parse an environment variable with a default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
