//! Data models for the proxy boundary and the upstream Hakka services.
//!
//! - `api`: request parameters and normalized responses returned to callers
//! - `backend`: JSON payloads sent to the translation and speech backends

pub mod api;
pub mod backend;

pub use api::*;

use chrono::{SecondsFormat, Utc};

/// Processing-time timestamp in RFC 3339 UTC with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
