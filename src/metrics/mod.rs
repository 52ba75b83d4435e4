// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, BACKEND_CALLS, BACKEND_DURATION, LOGINS, REQUESTS_TOTAL, REQUEST_DURATION,
    TOKEN_LOOKUPS,
};

/// Helper to record an inbound proxy operation
pub fn record_request(action: &str, outcome: &str, duration_secs: f64) {
    REQUESTS_TOTAL.with_label_values(&[action, outcome]).inc();
    REQUEST_DURATION
        .with_label_values(&[action])
        .observe(duration_secs);
}

/// Helper to record a credential cache lookup
pub fn record_token_lookup(service: &str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    TOKEN_LOOKUPS.with_label_values(&[service, result]).inc();
}

/// Helper to record a backend login attempt
pub fn record_login(service: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    LOGINS.with_label_values(&[service, status]).inc();
}

/// Helper to record an outbound backend HTTP call
pub fn record_backend_call(service: &str, kind: &str, status_code: u16, duration_secs: f64) {
    BACKEND_CALLS
        .with_label_values(&[service, kind, &status_code.to_string()])
        .inc();
    BACKEND_DURATION
        .with_label_values(&[service, kind])
        .observe(duration_secs);
}
