//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, route, status
//! - `api_request_duration_seconds` (histogram): handler latency
//! - `node_rpc_calls_total` (counter): node calls by method, outcome
//! - `node_rpc_duration_seconds` (histogram): node call latency
//! - `node_reachable` (gauge): 1 when the startup probe succeeded
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "api_requests_total",
        "method" => method.to_string(),
        "path" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "api_request_duration_seconds",
        "method" => method.to_string(),
        "path" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_rpc(method: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("node_rpc_calls_total", "method" => method, "outcome" => outcome).increment(1);
    metrics::histogram!("node_rpc_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_node_reachable(reachable: bool) {
    metrics::gauge!("node_reachable").set(if reachable { 1.0 } else { 0.0 });
}

/// Middleware recording one sample per request, labelled by matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Route templates keep label cardinality bounded.
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), &route, start);
    response
}
