// Configuration module

mod models;

pub use models::*;

use crate::error::{ProxyError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `HAKKA_PROXY_TTS__PASSWORD`.
pub const ENV_PREFIX: &str = "HAKKA_PROXY";

impl AppConfig {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file (`path`, or `~/.hakka-proxy/config.toml`)
    /// 3. Defaults (lowest)
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let file_path = path
            .map(str::to_string)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            // An explicitly requested file must exist; the default one is optional
            .add_source(File::with_name(&file_path).required(path.is_some()))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| ProxyError::Configuration(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ProxyError::Configuration(e.to_string()))
    }

    /// Credential settings that are absent or empty, as dotted keys.
    pub fn missing_credentials(&self) -> Vec<String> {
        let mut missing = Vec::new();

        for (section, backend) in [("translate", &self.translate), ("tts", &self.tts)] {
            if is_blank(&backend.username) {
                missing.push(format!("{}.username", section));
            }
            if is_blank(&backend.password) {
                missing.push(format!("{}.password", section));
            }
        }

        missing
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".hakka-proxy")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
