//! Metrics collection and Prometheus export.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::time::Duration;

/// Install the Prometheus recorder and return a handle for `/metrics`.
///
/// Must be called once, before any metric is recorded.
pub fn init_metrics() -> Result<PrometheusHandle, AppError> {
    PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })
}

/// Outcome label for `genai_generations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected,
    UpstreamError,
}

impl Outcome {
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Rejected => "rejected",
            Outcome::UpstreamError => "upstream_error",
        }
    }
}

pub fn record_generation(route: &'static str, outcome: Outcome) {
    counter!("genai_generations_total", "route" => route, "outcome" => outcome.as_str())
        .increment(1);
}

pub fn record_upstream_latency(route: &'static str, elapsed: Duration) {
    histogram!("genai_upstream_latency_seconds", "route" => route).record(elapsed.as_secs_f64());
}
