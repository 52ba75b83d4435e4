//! Axum-based HTTP server for hakka-proxy.
//!
//! Exposes the proxy operations over HTTP GET with query parameters, in the
//! `?action=` form the photo-to-speech client uses and on dedicated paths.
//!
//! # Components
//!
//! - `handlers`: Individual endpoints (action dispatch, health, translate, tts,
//!   token invalidation, metrics).
//! - `middleware`: Request ID tracking layers.
//! - `routes`: The router that ties everything together.
//!
//! # Token invalidation
//!
//! `DELETE /tokens` and `DELETE /tokens/:service` carry no authentication.
//! Anyone who can reach the listener can force a fresh backend login on the
//! next request. Keep the default loopback bind, or set
//! `server.token_admin = false` to leave the routes unmounted.

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
