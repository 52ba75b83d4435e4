// Inbound request and normalized response types
//
// These are the shapes the photo-to-speech client consumes. Field names on
// the wire follow the deployed client (camelCase for the speech result).

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Query parameters accepted on the `?action=` dispatch endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
    pub text: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub voice: Option<String>,
}

impl ActionQuery {
    pub fn translate_request(&self) -> TranslateRequest {
        TranslateRequest {
            text: self.text.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }

    pub fn speech_request(&self) -> SpeechRequest {
        SpeechRequest {
            text: self.text.clone(),
            voice: self.voice.clone(),
        }
    }
}

/// Translation input. Missing languages fall back to `zh` → `hak`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Speech synthesis input. A missing voice falls back to the default Hakka voice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRequest {
    pub text: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
    pub version: String,
}

impl HealthReport {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: timestamp(),
            environment: "rust".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub source: String,
    pub target: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResult {
    pub text: String,
    pub voice: String,
    /// Audio bytes, standard base64 with padding.
    pub audio_base64: String,
    /// Length of the decoded audio in bytes.
    pub audio_size: usize,
    pub timestamp: String,
}

impl SpeechResult {
    pub fn from_audio(text: String, voice: String, audio: &[u8]) -> Self {
        Self {
            text,
            voice,
            audio_base64: base64::engine::general_purpose::STANDARD.encode(audio),
            audio_size: audio.len(),
            timestamp: timestamp(),
        }
    }
}

/// Body returned for every business error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Result of exercising both backends end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub status: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<ServiceChecks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceChecks {
    pub translate: ServiceCheck,
    pub tts: ServiceCheck,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub status: String,
    pub last_test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokensCleared {
    pub cleared: usize,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speech_result_wire_names() {
        let result = SpeechResult::from_audio("蘋果".into(), "hak-xi-TW-vs2-M01".into(), b"ID3");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["audioBase64"], "SUQz");
        assert_eq!(json["audioSize"], 3);
        assert!(json.get("audio_base64").is_none());
    }

    #[test]
    fn test_error_body_omits_empty_message() {
        let json = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json.get("message").is_none());
        assert!(json["timestamp"].is_string());
    }

    proptest! {
        #[test]
        fn audio_base64_decodes_to_original_bytes(audio in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let result = SpeechResult::from_audio("t".into(), "v".into(), &audio);
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(&result.audio_base64)
                .unwrap();

            prop_assert_eq!(result.audio_size, audio.len());
            prop_assert_eq!(decoded, audio);
        }
    }
}
