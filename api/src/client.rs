//! JSON endpoint client over the request pipeline.

use std::sync::Arc;

use faultfinder_session::{Reply, Request, RequestPipeline};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Thin typed layer over [`RequestPipeline`].
#[derive(Clone)]
pub struct ApiClient {
    pipeline: Arc<RequestPipeline>,
}

impl ApiClient {
    /// Create a client over a shared pipeline.
    #[must_use]
    pub const fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    /// Execute a request and return the raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] when the exchange fails.
    pub async fn send(&self, request: &Request) -> ApiResult<Reply> {
        Ok(self.pipeline.execute(request).await?)
    }

    /// Execute a request and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] when the exchange fails, or a decode
    /// error when the body is missing or has the wrong shape.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &Request) -> ApiResult<T> {
        let reply = self.send(request).await?;
        decode(request.path(), reply)
    }
}

/// Decode a reply body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::EmptyBody`] or [`ApiError::Decode`].
pub fn decode<T: DeserializeOwned>(path: &str, reply: Reply) -> ApiResult<T> {
    let body = reply.body.ok_or_else(|| ApiError::empty_body(path))?;
    serde_json::from_value(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}
