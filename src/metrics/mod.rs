use crate::error::{AdmissionError, Result};
use axum::extract::State;
use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tracing::info;

/// Metrics service for collecting and exposing Prometheus metrics
#[derive(Clone)]
pub struct MetricsService {
    handle: Arc<PrometheusHandle>,
}

impl MetricsService {
    /// Create a new metrics service and install the global recorder
    pub fn new() -> Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            AdmissionError::Internal(format!("Failed to install metrics recorder: {}", e))
        })?;

        Self::register_metrics();

        info!("Metrics service initialized");

        Ok(Self {
            handle: Arc::new(handle),
        })
    }

    /// Register all metrics with descriptions
    fn register_metrics() {
        describe_counter!(
            "admission_requests_total",
            "Total number of requests submitted for admission"
        );
        describe_counter!(
            "admission_rejected_total",
            "Total number of requests rejected, labeled by reason"
        );
        describe_gauge!(
            "admission_active_windows",
            "Number of client windows currently tracked by the store"
        );
    }

    /// Render the current metrics in Prometheus exposition format
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Handler for `GET /metrics`, rendering the Prometheus exposition text.
pub async fn metrics_handler(State(state): State<crate::AppState>) -> String {
    match &state.metrics {
        Some(metrics) => metrics.render(),
        None => String::new(),
    }
}
