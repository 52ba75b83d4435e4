// Backend credential management module

mod manager;
mod store;

pub use manager::{CredentialCache, TOKEN_FIELDS};
pub use store::{InvalidateScope, TokenStore};

use crate::config::BackendConfig;
use crate::error::{ProxyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// The upstream services that require a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Translate,
    Tts,
}

impl ServiceName {
    pub const ALL: [ServiceName; 2] = [ServiceName::Translate, ServiceName::Tts];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Translate => "translate",
            ServiceName::Tts => "tts",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "translate" => Ok(ServiceName::Translate),
            "tts" => Ok(ServiceName::Tts),
            other => Err(ProxyError::Validation(format!(
                "Unknown service '{}', expected 'translate' or 'tts'",
                other
            ))),
        }
    }
}

/// Username/password pair for one backend login.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ServiceCredentials {
    pub username: String,
    pub password: String,
}

impl ServiceCredentials {
    /// Extracts credentials from backend settings, returning `None` when
    /// either half is absent or blank.
    pub fn from_config(config: &BackendConfig) -> Option<Self> {
        let username = config.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = config.password.as_deref().filter(|p| !p.trim().is_empty())?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

// Custom Debug impl that never logs the password
impl fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A bearer token and the instant after which it must not be handed out.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct CachedCredential {
    #[zeroize(skip)]
    pub service: ServiceName,
    pub token: String,
    #[zeroize(skip)]
    pub expires_at: DateTime<Utc>,
}

impl CachedCredential {
    /// A credential is usable strictly before its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }
}

impl fmt::Debug for CachedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedCredential")
            .field("service", &self.service)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_service_name_round_trip() {
        for service in ServiceName::ALL {
            assert_eq!(service.as_str().parse::<ServiceName>().unwrap(), service);
        }
        assert!(matches!(
            "speech".parse::<ServiceName>(),
            Err(ProxyError::Validation(_))
        ));
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let mut backend = AppConfig::default().translate;
        assert!(ServiceCredentials::from_config(&backend).is_none());

        backend.username = Some("translator".to_string());
        assert!(ServiceCredentials::from_config(&backend).is_none());

        backend.password = Some("".to_string());
        assert!(ServiceCredentials::from_config(&backend).is_none());

        backend.password = Some("pw".to_string());
        let creds = ServiceCredentials::from_config(&backend).unwrap();
        assert_eq!(creds.username, "translator");
    }

    #[test]
    fn test_debug_impls_mask_secrets() {
        let creds = ServiceCredentials {
            username: "translator".to_string(),
            password: "very-secret".to_string(),
        };
        let cached = CachedCredential {
            service: ServiceName::Tts,
            token: "eyJhbGciOiJIUzI1NiJ9.payload".to_string(),
            expires_at: Utc::now(),
        };

        assert!(!format!("{:?}", creds).contains("very-secret"));
        assert!(!format!("{:?}", cached).contains("eyJhbGci"));
    }

    #[test]
    fn test_validity_is_strict() {
        let now = Utc::now();
        let cached = CachedCredential {
            service: ServiceName::Translate,
            token: "t".to_string(),
            expires_at: now,
        };

        assert!(!cached.is_valid_at(now));
        assert!(cached.is_valid_at(now - chrono::Duration::milliseconds(1)));
    }
}
