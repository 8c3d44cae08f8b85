//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint body.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Outcome label values for `ocr_requests_total`.
pub mod outcome {
    pub const SUCCESS: &str = "success";
    pub const REJECTED: &str = "rejected";
    pub const PROVIDER_ERROR: &str = "provider_error";
}

/// Initialize the metrics recorder.
///
/// Call once at startup before any metrics are recorded. A second call is a
/// no-op.
pub fn init_metrics() -> Result<(), BuildError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_request(outcome: &'static str) {
    metrics::counter!("ocr_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_provider_call(elapsed: Duration, result: &'static str) {
    metrics::histogram!("ocr_provider_duration_seconds", "result" => result)
        .record(elapsed.as_secs_f64());
}
