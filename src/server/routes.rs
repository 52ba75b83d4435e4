// HTTP routes configuration

use super::handlers::{
    action_handler, clear_all_tokens_handler, clear_service_token_handler,
    deprecated_post_handler, health_handler, metrics_handler, translate_handler, tts_handler,
};
use super::middleware::{request_id_layers, request_span};
use crate::config::ServerConfig;
use crate::proxy::ProxyHandler;
use axum::routing::{delete, get};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub proxy: ProxyHandler,
}

pub fn create_router(config: &ServerConfig, proxy: ProxyHandler) -> Router {
    let state = AppState { proxy };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let mut router = Router::new()
        .route("/", get(action_handler).post(deprecated_post_handler))
        .route("/health", get(health_handler))
        .route("/translate", get(translate_handler))
        .route("/tts", get(tts_handler))
        .route("/metrics", get(metrics_handler));

    if config.token_admin {
        router = router
            .route("/tokens", delete(clear_all_tokens_handler))
            .route("/tokens/:service", delete(clear_service_token_handler));
    } else {
        info!("Token invalidation routes disabled (server.token_admin = false)");
    }

    router
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
