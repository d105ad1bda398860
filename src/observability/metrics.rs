//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mapper_requests_total` (counter): served requests by status
//! - `mapper_request_duration_seconds` (histogram): fetch + transform latency
//! - `mapper_operations_applied_total` (counter): pipeline operations by name

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::mapper::Pipeline;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a served request.
pub fn record_request(status: u16, start: Instant) {
    ::metrics::counter!("mapper_requests_total", "status" => status.to_string()).increment(1);
    ::metrics::histogram!("mapper_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the operations a pipeline run applied.
pub fn record_operations(pipeline: &Pipeline) {
    for operation in pipeline.operations() {
        ::metrics::counter!("mapper_operations_applied_total", "operation" => operation.name())
            .increment(1);
    }
}
