//! Mock transport for testing.
//!
//! [`ScriptedTransport`] answers requests from a per-path script instead of the
//! network and records every call it receives.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use faultfinder_session::{Method, Request, RequestError, RequestResult, Transport};
use serde_json::Value;
use tokio::sync::Mutex;

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method
    pub method: Method,
    /// Request path
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Whether credentials were requested
    pub include_credentials: bool,
}

#[derive(Debug, Default)]
struct Route {
    queued: VecDeque<RequestResult>,
    sticky: Option<RequestResult>,
    latency: Duration,
}

/// Scripted transport.
///
/// Each path answers with its queued one-shot responses first, then with its
/// sticky response. A path with nothing scripted answers with a transport
/// error. Latency is simulated with `tokio::time::sleep`, so tests running on a
/// paused clock stay deterministic.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `path` with `result` once the queue is drained.
    pub async fn respond(&self, path: &str, result: RequestResult) {
        self.routes
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .sticky = Some(result);
    }

    /// Answer the next request to `path` with `result`.
    pub async fn respond_once(&self, path: &str, result: RequestResult) {
        self.routes
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .queued
            .push_back(result);
    }

    /// Delay every answer on `path`.
    pub async fn with_latency(&self, path: &str, latency: Duration) {
        self.routes
            .lock()
            .await
            .entry(path.to_string())
            .or_default()
            .latency = latency;
    }

    /// All calls received so far, in arrival order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of calls received for `path`.
    pub async fn call_count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| call.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &Request) -> RequestResult {
        self.calls.lock().await.push(RecordedCall {
            method: request.method().clone(),
            path: request.path().to_string(),
            body: request.body().cloned(),
            include_credentials: request.includes_credentials(),
        });

        // The answer is chosen on arrival, before any simulated latency.
        let (result, latency) = {
            let mut routes = self.routes.lock().await;
            match routes.get_mut(request.path()) {
                Some(route) => {
                    let result = route.queued.pop_front().or_else(|| route.sticky.clone());
                    (result, route.latency)
                }
                None => (None, Duration::ZERO),
            }
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        result.unwrap_or_else(|| {
            Err(RequestError::transport(format!(
                "no scripted response for {}",
                request.path()
            )))
        })
    }
}
