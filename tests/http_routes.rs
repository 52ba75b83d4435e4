// HTTP boundary tests through the axum router

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use common::{test_config, test_handler};
use hakka_proxy::config::AppConfig;
use hakka_proxy::server::create_router;
use serde_json::Value;
use tower::ServiceExt;

// "蘋果", percent-encoded
const APPLE_QUERY: &str = "%E8%98%8B%E6%9E%9C";

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

async fn get_json(app: Router, uri: &str) -> Value {
    let (status, _, body) = send(app, Method::GET, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

fn app_for(config: &AppConfig) -> Router {
    create_router(&config.server, test_handler(config))
}

fn offline_app() -> Router {
    app_for(&test_config("http://127.0.0.1:1"))
}

#[tokio::test]
async fn test_action_health() {
    let json = get_json(offline_app(), "/?action=health").await;

    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_missing_text_returns_error_body_with_ok_status() {
    let json = get_json(offline_app(), "/?action=translate").await;

    assert!(json["error"].as_str().unwrap().contains("text"));
    assert!(json["timestamp"].is_string());

    let json = get_json(offline_app(), "/tts").await;
    assert!(json["error"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn test_repeated_query_parameter_returns_error_body() {
    for uri in [
        "/?action=translate&text=a&text=b",
        "/translate?text=a&text=b",
        "/tts?text=a&voice=x&voice=y",
    ] {
        let (status, headers, body) = send(offline_app(), Method::GET, uri).await;

        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json"));
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("duplicate field"), "{}", uri);
        assert!(json["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_unknown_action_returns_usage() {
    let json = get_json(offline_app(), "/?action=dance").await;

    assert_eq!(json["service"], "hakka-proxy");
    assert!(json["actions"]["translate"].is_string());
}

#[tokio::test]
async fn test_post_is_deprecated() {
    let (status, _, body) = send(offline_app(), Method::POST, "/").await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(json["error"].as_str().unwrap().contains("deprecated"));
    assert!(json["message"].as_str().unwrap().contains("action=translate"));
}

#[tokio::test]
async fn test_translate_and_tts_through_action_dispatch() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/translate/login")
        .with_status(200)
        .with_body(r#"{"token":"tok-t"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/tts/login")
        .with_status(200)
        .with_body(r#"{"access_token":"tok-s"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/translate")
        .match_header("authorization", "Bearer tok-t")
        .with_status(200)
        .with_body(r#"{"translation":"phìn-kó"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/tts/synthesize")
        .match_header("authorization", "Bearer tok-s")
        .with_status(200)
        .with_body(b"ID3\x04".to_vec())
        .create_async()
        .await;

    let app = app_for(&test_config(&server.url()));

    let translated = get_json(
        app.clone(),
        &format!("/?action=translate&text={}&source=zh&target=hak", APPLE_QUERY),
    )
    .await;
    assert_eq!(translated["original"], "蘋果");
    assert_eq!(translated["translated"], "phìn-kó");

    let spoken = get_json(
        app,
        &format!("/?action=tts&text={}&voice=hak-xi-TW-vs2-M01", APPLE_QUERY),
    )
    .await;
    assert_eq!(spoken["audioSize"], 4);
    assert_eq!(spoken["audioBase64"], "SUQzBA==");
    assert_eq!(spoken["voice"], "hak-xi-TW-vs2-M01");
}

#[tokio::test]
async fn test_backend_failure_is_reported_in_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/tts/login")
        .with_status(401)
        .with_body("bad credentials")
        .create_async()
        .await;

    let app = app_for(&test_config(&server.url()));
    let json = get_json(app, &format!("/tts?text={}", APPLE_QUERY)).await;

    let error = json["error"].as_str().unwrap();
    assert!(error.contains("tts"));
    assert!(error.contains("401"));
}

#[tokio::test]
async fn test_token_invalidation_routes() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/translate/login")
        .with_status(200)
        .with_body(r#"{"token":"tok-t"}"#)
        .expect(2)
        .create_async()
        .await;
    server
        .mock("POST", "/translate")
        .with_status(200)
        .with_body(r#"{"output":"X"}"#)
        .create_async()
        .await;

    let app = app_for(&test_config(&server.url()));
    let translate_uri = format!("/translate?text={}", APPLE_QUERY);

    get_json(app.clone(), &translate_uri).await;

    let (status, _, body) = send(app.clone(), Method::DELETE, "/tokens/translate").await;
    assert_eq!(status, StatusCode::OK);
    let cleared: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(cleared["cleared"], 1);

    get_json(app.clone(), &translate_uri).await;

    let (_, _, body) = send(app.clone(), Method::DELETE, "/tokens").await;
    let cleared: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(cleared["cleared"], 1);

    let (_, _, body) = send(app, Method::DELETE, "/tokens/speech").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("speech"));

    login.assert_async().await;
}

#[tokio::test]
async fn test_token_routes_can_be_disabled() {
    let mut config = test_config("http://127.0.0.1:1");
    config.server.token_admin = false;
    let app = app_for(&config);

    let (status, _, _) = send(app.clone(), Method::DELETE, "/tokens").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(app.clone(), Method::DELETE, "/tokens/translate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Everything else stays mounted
    get_json(app, "/health").await;
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (_, headers, _) = send(offline_app(), Method::GET, "/health").await;
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_caller_request_id_is_echoed() {
    let response = offline_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "photo-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "photo-42");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = offline_app();
    get_json(app.clone(), "/?action=health").await;

    let (status, headers, body) = send(app, Method::GET, "/metrics").await;
    let text = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/plain"));
    assert!(text.contains("proxy_requests_total"));
}
