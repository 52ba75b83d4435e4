// HTTP request handlers

use super::routes::AppState;
use crate::auth::{InvalidateScope, ServiceName};
use crate::error::{ProxyError, Result};
use crate::models::{
    timestamp, ActionQuery, ErrorBody, HealthReport, SpeechRequest, SpeechResult,
    TokensCleared, TranslateRequest, TranslationResult,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::future::Future;
use std::time::Instant;
use tracing::debug;

/// Records duration and outcome for one proxy operation.
async fn instrumented<T, F>(action: &str, operation: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let result = operation.await;
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    crate::metrics::record_request(action, outcome, started.elapsed().as_secs_f64());
    result
}

/// Turns an unparseable query string (e.g. a repeated `text`) into a
/// business error instead of axum's plain-text 400.
fn parse_query<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ProxyError::Validation(rejection.body_text()))
}

/// `GET /?action=...` dispatch used by the deployed client.
pub async fn action_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ActionQuery>, QueryRejection>,
) -> Response {
    let query = match parse_query(query) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    debug!(action = ?query.action, "Dispatching action request");

    match query.action.as_deref() {
        Some("health") => health_handler(State(state)).await.into_response(),
        Some("translate") => {
            translate_handler(State(state), Ok(Query(query.translate_request())))
                .await
                .into_response()
        }
        Some("tts") => tts_handler(State(state), Ok(Query(query.speech_request())))
            .await
            .into_response(),
        _ => usage().into_response(),
    }
}

/// `POST /` is kept only to tell old clients to switch to GET.
pub async fn deprecated_post_handler() -> Json<ErrorBody> {
    Json(
        ErrorBody::new("POST requests are deprecated, use GET requests instead")
            .with_message("Use the GET form: ?action=translate&text=蘋果"),
    )
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    let started = Instant::now();
    let report = state.proxy.health();
    crate::metrics::record_request("health", "ok", started.elapsed().as_secs_f64());
    Json(report)
}

pub async fn translate_handler(
    State(state): State<AppState>,
    request: std::result::Result<Query<TranslateRequest>, QueryRejection>,
) -> Result<Json<TranslationResult>> {
    instrumented("translate", async { state.proxy.translate(parse_query(request)?).await })
        .await
        .map(Json)
}

pub async fn tts_handler(
    State(state): State<AppState>,
    request: std::result::Result<Query<SpeechRequest>, QueryRejection>,
) -> Result<Json<SpeechResult>> {
    instrumented("tts", async { state.proxy.synthesize(parse_query(request)?).await })
        .await
        .map(Json)
}

/// `DELETE /tokens`: forget every cached bearer token.
pub async fn clear_all_tokens_handler(State(state): State<AppState>) -> Json<TokensCleared> {
    let cleared = state.proxy.invalidate(InvalidateScope::All);
    Json(TokensCleared {
        cleared,
        timestamp: timestamp(),
    })
}

/// `DELETE /tokens/:service`: forget one service's cached bearer token.
pub async fn clear_service_token_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<TokensCleared>> {
    let service: ServiceName = service.parse()?;
    let cleared = state.proxy.invalidate(InvalidateScope::Service(service));
    Ok(Json(TokensCleared {
        cleared,
        timestamp: timestamp(),
    }))
}

pub async fn metrics_handler() -> std::result::Result<Response, ProxyError> {
    let body = crate::metrics::gather_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}

fn usage() -> Json<serde_json::Value> {
    Json(json!({
        "service": "hakka-proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "timestamp": timestamp(),
        "actions": {
            "health": "?action=health",
            "translate": "?action=translate&text=蘋果[&source=zh&target=hak]",
            "tts": "?action=tts&text=蘋果[&voice=hak-xi-TW-vs2-M01]",
        },
    }))
}
