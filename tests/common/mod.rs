// Shared fixtures for integration tests

#![allow(dead_code)]

use hakka_proxy::config::AppConfig;
use hakka_proxy::proxy::ProxyHandler;

pub const TRANSLATE_USER: &str = "translator";
pub const TRANSLATE_PASSWORD: &str = "translate-pw";
pub const TTS_USER: &str = "speaker";
pub const TTS_PASSWORD: &str = "tts-pw";

/// Config with both backends pointed at a mock server and credentials provisioned.
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();

    config.translate.login_url = format!("{}/translate/login", base_url);
    config.translate.api_url = format!("{}/translate", base_url);
    config.translate.username = Some(TRANSLATE_USER.to_string());
    config.translate.password = Some(TRANSLATE_PASSWORD.to_string());

    config.tts.login_url = format!("{}/tts/login", base_url);
    config.tts.api_url = format!("{}/tts/synthesize", base_url);
    config.tts.username = Some(TTS_USER.to_string());
    config.tts.password = Some(TTS_PASSWORD.to_string());

    config
}

pub fn test_handler(config: &AppConfig) -> ProxyHandler {
    ProxyHandler::from_config(config).expect("handler builds from test config")
}

/// Serves canned raw HTTP responses keyed by request path, one per
/// connection. Lets tests send a body shorter than its `Content-Length`,
/// which mockito cannot do.
pub async fn raw_http_server(routes: Vec<(&'static str, String)>) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind raw server");
    let addr = listener.local_addr().expect("raw server address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];

            // Read headers, then drain the declared body before answering
            let header_end = loop {
                let n = match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break None,
                    Ok(n) => n,
                };
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break Some(pos + 4);
                }
            };
            let Some(header_end) = header_end else { continue };

            let head = String::from_utf8_lossy(&request[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
            let response = routes
                .iter()
                .find(|(route, _)| *route == path)
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| {
                    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string()
                });

            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// A response that promises more body bytes than it sends.
pub fn truncated_response(status_line: &str, partial_body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        partial_body.len() + 64,
        partial_body
    )
}

/// A complete JSON response.
pub fn json_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}
