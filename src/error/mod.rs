// Error types for hakka-proxy

use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed for {service} service: {message}")]
    Authentication { service: String, message: String },

    #[error("{service} backend responded with HTTP {status}: {body}")]
    Backend {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Stable label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Configuration(_) | ProxyError::ConfigParsing(_) => "configuration_error",
            ProxyError::Authentication { .. } => "authentication_error",
            ProxyError::Backend { .. } => "backend_error",
            ProxyError::Validation(_) => "validation_error",
            ProxyError::Http(_) => "transport_error",
            ProxyError::Json(_) | ProxyError::Io(_) | ProxyError::Internal(_) => "internal_error",
        }
    }
}

// Business errors travel in the body; the transport status stays 200 so
// callers can always parse `{error, timestamp}`.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::Validation(_) => tracing::debug!(kind = self.kind(), "{}", self),
            _ => tracing::error!(kind = self.kind(), "{}", self),
        }

        Json(ErrorBody::new(self.to_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
