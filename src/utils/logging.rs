//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a sanitizer that keeps
//! bearer tokens and passwords out of logged payloads.

use crate::config::LoggingConfig;
use crate::error::{ProxyError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    result.map_err(|e| ProxyError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// `Bearer <token>` in headers or free text.
static BEARER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(bearer\s+)[A-Za-z0-9._~+/=-]+").expect("valid bearer pattern"));

/// JSON string fields that carry secrets.
static SECRET_FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"("(?:token|access_token|refresh_token|password)"\s*:\s*)"(?:[^"\\]|\\.)*""#)
        .expect("valid secret field pattern")
});

/// Sanitizes sensitive information from log messages.
///
/// Replaces bearer credentials and the values of `token`, `access_token`,
/// `refresh_token` and `password` JSON fields with `[REDACTED]`, leaving the
/// rest of the text intact so payloads stay useful for debugging.
pub fn sanitize(input: &str) -> String {
    let result = BEARER.replace_all(input, "${1}[REDACTED]");
    SECRET_FIELDS
        .replace_all(&result, "${1}\"[REDACTED]\"")
        .into_owned()
}
