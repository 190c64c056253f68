//! Prometheus metrics recorder and metric names.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the handle used to render the `/metrics` endpoint. Call once
/// at server startup before any metrics are recorded.
pub fn install_recorder() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install metrics recorder");
    info!("prometheus metrics recorder installed");
    handle
}

// Metric name constants to avoid typos across modules.

/// Inbound `/chat` requests (counter).
pub const RELAY_REQUESTS_TOTAL: &str = "relay_requests_total";
/// Failed `/chat` requests (counter, labels: status).
pub const RELAY_ERRORS_TOTAL: &str = "relay_errors_total";
