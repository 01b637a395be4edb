//! Metrics collection and exposition.
//!
//! # Metrics
//! - `devserver_requests_total` (counter): requests by route kind and status
//! - `devserver_request_duration_seconds` (histogram): latency by route kind
//!
//! Without an installed recorder the macros are no-ops.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "devserver_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("devserver_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
