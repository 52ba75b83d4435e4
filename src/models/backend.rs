// Upstream backend payload definitions
// Shapes expected by the Hakka translation and speech synthesis services.

use serde::{Serialize, Serializer};

/// Login body shared by both services.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    /// Only the translation service expects this flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<u8>,
}

// Custom Debug impl that never prints the password
impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct TranslateBackendRequest<'a> {
    pub input: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeBackendRequest<'a> {
    pub input: SynthesisInput<'a>,
    pub voice: VoiceSelection<'a>,
    pub audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisInput<'a> {
    pub text: &'a str,
    pub text_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection<'a> {
    pub language_code: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig<'a> {
    /// Sent as `1`, not `1.0`, when the rate is a whole number.
    #[serde(serialize_with = "serialize_rate")]
    pub speaking_rate: f32,
    pub audio_encoding: &'a str,
}

fn serialize_rate<S: Serializer>(rate: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    if rate.is_finite() && rate.fract() == 0.0 && rate.abs() < i64::MAX as f32 {
        serializer.serialize_i64(*rate as i64)
    } else {
        serializer.serialize_f32(*rate)
    }
}
