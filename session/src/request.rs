//! Replayable requests and successful replies.

use serde_json::Value;

pub use reqwest::Method;

/// A logical API request.
///
/// Requests are immutable once built and are sent by reference, so the
/// pipeline can replay the same request after a session refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    body: Option<Value>,
    include_credentials: bool,
}

impl Request {
    /// Create a request. Credentials are included by default.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            include_credentials: true,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// `PATCH` request with a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send without cookies.
    #[must_use]
    pub const fn without_credentials(mut self) -> Self {
        self.include_credentials = false;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether cookies are sent with this request.
    #[must_use]
    pub const fn includes_credentials(&self) -> bool {
        self.include_credentials
    }
}

/// A 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// Parsed response body; `None` when the response was empty
    pub body: Option<Value>,
}

impl Reply {
    /// Create a reply.
    #[must_use]
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Whether the reply carries a meaningful body.
    ///
    /// `null`, `false`, `0` and the empty string count as absent.
    #[must_use]
    pub fn has_body(&self) -> bool {
        match &self.body {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_none_or(|v| v.abs() > 0.0),
            Some(_) => true,
        }
    }
}
