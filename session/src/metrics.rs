//! Refresh and retry counters.

use faultfinder_common::Counter;

/// Counters shared by the coordinator and the pipeline.
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Refresh exchanges actually sent
    pub refresh_exchanges: Counter,
    /// Refresh exchanges that ended in `Failed`
    pub refresh_failures: Counter,
    /// Callers that waited on another caller's refresh
    pub refresh_joins: Counter,
    /// Requests replayed after a successful refresh
    pub retried_requests: Counter,
}

/// Plain copy of the counter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// See [`PipelineMetrics::refresh_exchanges`]
    pub refresh_exchanges: u64,
    /// See [`PipelineMetrics::refresh_failures`]
    pub refresh_failures: u64,
    /// See [`PipelineMetrics::refresh_joins`]
    pub refresh_joins: u64,
    /// See [`PipelineMetrics::retried_requests`]
    pub retried_requests: u64,
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self {
            refresh_exchanges: Counter::new(
                "session_refresh_exchanges_total",
                "Session refresh exchanges sent",
            ),
            refresh_failures: Counter::new(
                "session_refresh_failures_total",
                "Session refresh exchanges that failed",
            ),
            refresh_joins: Counter::new(
                "session_refresh_joins_total",
                "Callers that joined an in-flight refresh",
            ),
            retried_requests: Counter::new(
                "session_retried_requests_total",
                "Requests replayed after a session refresh",
            ),
        }
    }
}

impl PipelineMetrics {
    /// Current values.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            refresh_exchanges: self.refresh_exchanges.get(),
            refresh_failures: self.refresh_failures.get(),
            refresh_joins: self.refresh_joins.get(),
            retried_requests: self.retried_requests.get(),
        }
    }

    /// All counters in Prometheus text format.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        [
            &self.refresh_exchanges,
            &self.refresh_failures,
            &self.refresh_joins,
            &self.retried_requests,
        ]
        .iter()
        .map(|counter| counter.to_prometheus())
        .collect()
    }
}
