//! The three proxy operations: health, translate, and synthesize.
//!
//! `ProxyHandler` validates input, fetches a bearer token from the shared
//! `CredentialCache`, makes exactly one backend call, and normalizes the
//! result. It holds no per-request state.

use crate::auth::{CredentialCache, InvalidateScope, ServiceName};
use crate::backend::extract::first_text_field;
use crate::backend::{build_http_client, BackendClient};
use crate::config::AppConfig;
use crate::error::{ProxyError, Result};
use crate::models::{
    timestamp, DiagnosticReport, HealthReport, ServiceCheck, ServiceChecks, SpeechRequest,
    SpeechResult, TranslateRequest, TranslationResult,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "zh";
pub const DEFAULT_TARGET_LANGUAGE: &str = "hak";
pub const DEFAULT_VOICE: &str = "hak-xi-TW-vs2-M01";

/// Field names under which the translation backend may return its output, by priority.
pub const TRANSLATION_FIELDS: &[&str] = &["output", "translation", "result"];

/// Sample used by `diagnose` ("apple").
const DIAGNOSTIC_TEXT: &str = "蘋果";

#[derive(Clone)]
pub struct ProxyHandler {
    credentials: CredentialCache,
    backend: Arc<BackendClient>,
}

impl ProxyHandler {
    pub fn new(credentials: CredentialCache, backend: BackendClient) -> Self {
        Self {
            credentials,
            backend: Arc::new(backend),
        }
    }

    /// Wires a handler from configuration with one shared HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http_client = build_http_client(&config.http)?;
        let credentials = CredentialCache::new(config, http_client.clone());
        let backend = BackendClient::new(config, http_client);
        Ok(Self::new(credentials, backend))
    }

    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// Liveness only: never touches a backend.
    pub fn health(&self) -> HealthReport {
        HealthReport::ok()
    }

    /// Translates `text`, falling back to the input when the backend
    /// response carries no recognizable output field.
    ///
    /// # Errors
    ///
    /// `Validation` for missing text (before any network call), otherwise
    /// whatever the credential cache or backend returns.
    pub async fn translate(&self, request: TranslateRequest) -> Result<TranslationResult> {
        let text = required_text(request.text)?;
        let source = request
            .source
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string());
        let target = request
            .target
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

        info!(chars = text.chars().count(), %source, %target, "Translating text");

        let token = self.credentials.get_token(ServiceName::Translate).await?;
        let response = self.backend.translate(&token, &text).await?;

        let translated = match first_text_field(&response, TRANSLATION_FIELDS) {
            Some(translated) => translated.to_string(),
            None => {
                warn!("Translate response had no output field; returning input unchanged");
                text.clone()
            }
        };

        let result = TranslationResult {
            original: text,
            translated,
            source,
            target,
            timestamp: timestamp(),
        };
        debug!(result = ?result, "Translation complete");
        Ok(result)
    }

    /// Synthesizes speech for `text` and returns the audio as base64.
    ///
    /// # Errors
    ///
    /// `Validation` for missing text (before any network call), otherwise
    /// whatever the credential cache or backend returns.
    pub async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResult> {
        let text = required_text(request.text)?;
        let voice = request
            .voice
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VOICE.to_string());

        info!(chars = text.chars().count(), %voice, "Synthesizing speech");

        let token = self.credentials.get_token(ServiceName::Tts).await?;
        let audio = self.backend.synthesize(&token, &text, &voice).await?;

        let result = SpeechResult::from_audio(text, voice, &audio);
        debug!(
            text = %result.text,
            voice = %result.voice,
            audio_size = result.audio_size,
            "Speech synthesis complete"
        );
        Ok(result)
    }

    /// Drops cached tokens for one service or all of them.
    pub fn invalidate(&self, scope: InvalidateScope) -> usize {
        self.credentials.invalidate(scope)
    }

    /// Runs a real translate and synthesize round against both backends.
    pub async fn diagnose(&self) -> DiagnosticReport {
        info!("Running backend diagnostics");

        let outcome = async {
            let translation = self
                .translate(TranslateRequest {
                    text: Some(DIAGNOSTIC_TEXT.to_string()),
                    ..Default::default()
                })
                .await?;
            let speech = self
                .synthesize(SpeechRequest {
                    text: Some(DIAGNOSTIC_TEXT.to_string()),
                    voice: None,
                })
                .await?;
            Ok::<_, ProxyError>((translation, speech))
        }
        .await;

        match outcome {
            Ok((translation, speech)) => DiagnosticReport {
                status: "healthy".to_string(),
                timestamp: timestamp(),
                services: Some(ServiceChecks {
                    translate: ServiceCheck {
                        status: "ok".to_string(),
                        last_test: translation.timestamp,
                        audio_size: None,
                    },
                    tts: ServiceCheck {
                        status: "ok".to_string(),
                        last_test: speech.timestamp,
                        audio_size: Some(speech.audio_size),
                    },
                }),
                error: None,
            },
            Err(e) => {
                warn!(kind = e.kind(), "Diagnostics failed: {}", e);
                DiagnosticReport {
                    status: "unhealthy".to_string(),
                    timestamp: timestamp(),
                    services: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn required_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ProxyError::Validation(
            "Missing required parameter: text".to_string(),
        )),
    }
}
