//! Configuration data structures for hakka-proxy.
//!
//! This module defines the schema for the application settings: the listen
//! address, both upstream Hakka services (endpoints and login credentials),
//! speech synthesis parameters, token lifetime, outbound HTTP behavior, and
//! logging.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Machine translation backend.
    #[serde(default = "default_translate_backend")]
    pub translate: BackendConfig,

    /// Text-to-speech backend.
    #[serde(default = "default_tts_backend")]
    pub tts: BackendConfig,

    /// Fixed parts of the synthesis payload.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Bearer token caching.
    #[serde(default)]
    pub token: TokenConfig,

    /// Outbound HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Mount `DELETE /tokens` and `DELETE /tokens/:service`.
    /// The routes are unauthenticated and each call forces a fresh backend
    /// login on the next request; turn this off on shared networks.
    /// Default: `true`
    #[serde(default = "default_token_admin")]
    pub token_admin: bool,
}

/// Endpoints and credentials for one upstream service.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Login endpoint returning `{token}` or `{access_token}`.
    pub login_url: String,

    /// Operation endpoint (translate or synthesize).
    pub api_url: String,

    /// Service account name. No default; must be provisioned.
    #[serde(default)]
    pub username: Option<String>,

    /// Service account password. No default; must be provisioned.
    #[serde(default)]
    pub password: Option<String>,

    /// Value of `rememberMe` sent with the login body, if any.
    #[serde(default)]
    pub remember_me: Option<u8>,
}

// Custom Debug impl that never prints the password
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("login_url", &self.login_url)
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// Constant parts of the speech synthesis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Default: `hak-xi-TW`
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Default: `common`
    #[serde(default = "default_text_type")]
    pub text_type: String,

    /// Default: `1.0`
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,

    /// Default: `MP3`
    #[serde(default = "default_audio_encoding")]
    pub audio_encoding: String,
}

/// Settings for the credential cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Seconds a freshly obtained bearer token is trusted.
    /// Default: `3600` (1 hour)
    #[serde(default = "default_token_ttl")]
    pub ttl_seconds: u64,
}

/// Settings for the outbound HTTP client shared by all backend calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connection establishment timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Skip TLS certificate validation. Logged loudly when enabled.
    /// Default: `false`
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            translate: default_translate_backend(),
            tts: default_tts_backend(),
            speech: SpeechConfig::default(),
            token: TokenConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            token_admin: default_token_admin(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            text_type: default_text_type(),
            speaking_rate: default_speaking_rate(),
            audio_encoding: default_audio_encoding(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_token_ttl(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_token_admin() -> bool {
    true
}

pub(crate) fn default_translate_backend() -> BackendConfig {
    BackendConfig {
        login_url: "https://hktrans.bronci.com.tw/api/v1/tts/login".to_string(),
        api_url: "https://hktrans.bronci.com.tw/MT/translate/hakka_zh_hk".to_string(),
        username: None,
        password: None,
        remember_me: Some(0),
    }
}

pub(crate) fn default_tts_backend() -> BackendConfig {
    BackendConfig {
        login_url: "https://hktts.bronci.com.tw/api/v1/login".to_string(),
        api_url: "https://hktts.bronci.com.tw/api/v1/tts/synthesize".to_string(),
        username: None,
        password: None,
        remember_me: None,
    }
}

fn default_language_code() -> String {
    "hak-xi-TW".to_string()
}

fn default_text_type() -> String {
    "common".to_string()
}

fn default_speaking_rate() -> f32 {
    1.0
}

fn default_audio_encoding() -> String {
    "MP3".to_string()
}

fn default_token_ttl() -> u64 {
    3600 // 1 hour
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
