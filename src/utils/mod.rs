//! Utility functions and helpers for hakka-proxy.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret scrubbing for logged payloads.

pub mod logging;
