// Prometheus metrics registry and collectors

use crate::error::{ProxyError, Result};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Inbound proxy operations by outcome
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("proxy_requests_total", "Total proxy operations handled"),
        &["action", "outcome"], // outcome: ok or an error kind
        REGISTRY
    ).expect("proxy_requests_total registers once");

    /// Inbound operation duration
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("proxy_request_duration_seconds", "Proxy operation duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["action"],
        REGISTRY
    ).expect("proxy_request_duration_seconds registers once");

    // ============================================================================
    // CREDENTIAL CACHE METRICS
    // ============================================================================

    /// Token lookups by result
    pub static ref TOKEN_LOOKUPS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("token_cache_lookups_total", "Bearer token cache lookups"),
        &["service", "result"], // result: hit, miss
        REGISTRY
    ).expect("token_cache_lookups_total registers once");

    /// Backend logins by outcome
    pub static ref LOGINS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("backend_logins_total", "Backend login attempts"),
        &["service", "status"], // status: success, failure
        REGISTRY
    ).expect("backend_logins_total registers once");

    // ============================================================================
    // BACKEND METRICS
    // ============================================================================

    /// Outbound HTTP calls by status code
    pub static ref BACKEND_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("backend_calls_total", "Outbound backend HTTP calls"),
        &["service", "kind", "status_code"], // kind: login, call
        REGISTRY
    ).expect("backend_calls_total registers once");

    /// Outbound HTTP call duration
    pub static ref BACKEND_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("backend_call_duration_seconds", "Outbound backend call duration")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "kind"],
        REGISTRY
    ).expect("backend_call_duration_seconds registers once");
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ProxyError::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| ProxyError::Internal(format!("Metrics are not UTF-8: {}", e)))
}
