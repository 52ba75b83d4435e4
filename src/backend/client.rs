// Hakka translation and speech backend client

use crate::auth::ServiceName;
use crate::config::{AppConfig, SpeechConfig};
use crate::error::{ProxyError, Result};
use crate::models::backend::{
    AudioConfig, SynthesisInput, SynthesizeBackendRequest, TranslateBackendRequest, VoiceSelection,
};
use crate::utils::logging::sanitize;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

/// Issues authenticated calls to the translate and tts endpoints.
///
/// Tokens are supplied by the caller; this client never logs in and never
/// retries. A non-success status is returned as `ProxyError::Backend` with
/// the status code and response body.
pub struct BackendClient {
    http_client: Client,
    translate_url: String,
    tts_url: String,
    speech: SpeechConfig,
}

impl BackendClient {
    pub fn new(config: &AppConfig, http_client: Client) -> Self {
        Self {
            http_client,
            translate_url: config.translate.api_url.clone(),
            tts_url: config.tts.api_url.clone(),
            speech: config.speech.clone(),
        }
    }

    /// Sends `{input: text}` to the translation endpoint.
    ///
    /// Returns the parsed JSON body. A success response whose body is not
    /// JSON yields `Value::Null` so the caller can apply its fallback.
    pub async fn translate(&self, token: &str, text: &str) -> Result<Value> {
        let payload = TranslateBackendRequest { input: text };
        let response = self
            .post(ServiceName::Translate, &self.translate_url, token, &payload)
            .await?;

        let body = response.text().await?;
        debug!(response = %sanitize(&body), "Translate backend response");

        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            warn!("Translate backend returned a non-JSON body: {}", e);
            Value::Null
        }))
    }

    /// Requests speech audio for `text` in `voice` and returns the raw audio bytes.
    pub async fn synthesize(&self, token: &str, text: &str, voice: &str) -> Result<Bytes> {
        let payload = SynthesizeBackendRequest {
            input: SynthesisInput {
                text,
                text_type: &self.speech.text_type,
            },
            voice: VoiceSelection {
                language_code: &self.speech.language_code,
                name: voice,
            },
            audio_config: AudioConfig {
                speaking_rate: self.speech.speaking_rate,
                audio_encoding: &self.speech.audio_encoding,
            },
        };

        let response = self
            .post(ServiceName::Tts, &self.tts_url, token, &payload)
            .await?;

        let audio = response.bytes().await?;
        debug!(bytes = audio.len(), "TTS backend returned audio");
        Ok(audio)
    }

    /// Posts `payload` with bearer auth and maps non-success statuses to
    /// `ProxyError::Backend`.
    async fn post<T: Serialize + std::fmt::Debug>(
        &self,
        service: ServiceName,
        url: &str,
        token: &str,
        payload: &T,
    ) -> Result<Response> {
        debug!(service = %service, url = %url, payload = ?payload, "Calling backend");

        let started = Instant::now();
        let response = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        crate::metrics::record_backend_call(
            service.as_str(),
            "call",
            status.as_u16(),
            started.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            warn!(service = %service, status = status.as_u16(), "Backend call failed");
            return Err(ProxyError::Backend {
                service: service.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}
