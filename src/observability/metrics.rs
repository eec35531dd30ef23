//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by operation, status
//! - `proxy_request_duration_seconds` (histogram): latency by operation
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! `init_metrics` installs the Prometheus exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one forwarded request.
pub fn record_request(operation: &'static str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("proxy_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
