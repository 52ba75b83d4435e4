// hakka-proxy - Token-caching proxy for Hakka translation and speech synthesis

pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod proxy;
pub mod server;
pub mod utils;
