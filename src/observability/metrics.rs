//! Metrics collection and exposition.
//!
//! # Metrics
//! - `paste_requests_total` (counter): API requests by endpoint, status
//! - `paste_request_duration_seconds` (histogram): API latency
//! - `paste_created_total` (counter): pastes stored
//! - `paste_purged_total` (counter): expired pastes removed
//! - `spa_navigations_total` (counter): resolved navigations by route
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels limited to endpoint, status and route name (bounded cardinality)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(endpoint: String, status: u16, start: Instant) {
    counter!(
        "paste_requests_total",
        "endpoint" => endpoint.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("paste_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_created() {
    counter!("paste_created_total").increment(1);
}

pub fn record_purged(count: u64) {
    counter!("paste_purged_total").increment(count);
}

pub fn record_navigation(route: &str) {
    counter!("spa_navigations_total", "route" => route.to_string()).increment(1);
}
