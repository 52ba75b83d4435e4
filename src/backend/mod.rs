// Upstream backend module

mod client;
pub mod extract;

pub use client::BackendClient;

use crate::config::HttpConfig;
use crate::error::{ProxyError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Builds the HTTP client shared by logins and backend calls.
///
/// Certificate validation stays on unless `accept_invalid_certs` is set,
/// in which case a warning is logged every time a client is built.
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_nodelay(true)
        .use_rustls_tls();

    if config.accept_invalid_certs {
        warn!(
            "TLS certificate validation is DISABLED for backend calls (http.accept_invalid_certs = true). \
             Only use this against backends with broken certificate chains you trust."
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    let client = builder
        .build()
        .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

    debug!(
        timeout_seconds = config.timeout_seconds,
        "Created backend HTTP client"
    );
    Ok(client)
}
