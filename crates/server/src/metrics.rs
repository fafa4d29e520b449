//! Prometheus metrics

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder; call once at startup
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");
    if PROMETHEUS.set(handle).is_err() {
        tracing::warn!("Metrics recorder already installed");
    }
}

/// Render the current metric values
pub async fn metrics_handler() -> String {
    PROMETHEUS
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Count a provider status callback by reported status
pub fn record_status_event(status: &str) {
    metrics::counter!("fieldcall_status_events_total", "status" => status.to_string())
        .increment(1);
}

/// Count a provider recording callback
pub fn record_recording_event() {
    metrics::counter!("fieldcall_recording_events_total").increment(1);
}

/// Count a generated calling list and observe its size
pub fn record_list_generated(size: usize) {
    metrics::counter!("fieldcall_calling_lists_total").increment(1);
    metrics::histogram!("fieldcall_calling_list_size").record(size as f64);
}

/// Count a recorded manual outcome
pub fn record_outcome() {
    metrics::counter!("fieldcall_outcomes_recorded_total").increment(1);
}

/// Count a storage failure surfaced to a webhook sender
pub fn record_storage_failure() {
    metrics::counter!("fieldcall_storage_failures_total").increment(1);
}
