//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Install the Prometheus exporter on its own listener
//! - Record per-request and per-retry measurements
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, service
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_upstream_retries_total` (counter): retried attempts by service
//!
//! # Design Decisions
//! - The service label uses the route-table name ("auth", "ledger", ...) or
//!   "none" for unrouted requests, never the backend URL, so a URL change
//!   does not split the series
//! - Recording goes through the `metrics` facade; without an installed
//!   exporter (unit tests) every call is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions.
///
/// Failure to bind the exporter is logged and swallowed; the gateway keeps
/// serving traffic without metrics.
pub fn init_metrics(address: SocketAddr) {
    if let Err(err) = PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
    {
        tracing::error!(address = %address, error = %err, "Failed to install metrics exporter");
        return;
    }

    describe_counter!(
        "gateway_requests_total",
        "Requests handled, by method, status and backend service"
    );
    describe_histogram!(
        "gateway_request_duration_seconds",
        "End-to-end request latency in seconds"
    );
    describe_counter!(
        "gateway_upstream_retries_total",
        "Upstream attempts retried after a transient failure"
    );

    tracing::info!(address = %address, "Metrics exporter listening");
}

/// Record one handled request, whatever its outcome.
pub fn record_request(method: &str, status: u16, service: &str, started: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "service" => service.to_string()
    )
    .record(started.elapsed().as_secs_f64());
}

/// Record one retried upstream attempt.
pub fn record_retry(service: &str) {
    counter!(
        "gateway_upstream_retries_total",
        "service" => service.to_string()
    )
    .increment(1);
}
