//! Bearer token acquisition for the Hakka backends.
//!
//! `CredentialCache` hands out a valid bearer token per service. A hit in the
//! `TokenStore` costs no network call; a miss logs in with the provisioned
//! username/password and caches the result for the configured TTL.
//!
//! Concurrent misses for the same service are not serialized. Each performs
//! its own login and the last one to finish wins the cache slot; backend
//! logins are idempotent so the duplicate work is harmless.

use super::store::{InvalidateScope, TokenStore};
use super::{ServiceCredentials, ServiceName};
use crate::backend::extract::first_text_field;
use crate::config::{AppConfig, BackendConfig};
use crate::error::{ProxyError, Result};
use crate::models::backend::LoginRequest;
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Field names under which a login response may carry the token, by priority.
pub const TOKEN_FIELDS: &[&str] = &["token", "access_token"];

// Keeps `now + ttl` far from chrono's representable range.
const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 3600;

/// Login settings for one service.
#[derive(Debug, Clone)]
struct LoginEndpoint {
    url: String,
    credentials: Option<ServiceCredentials>,
    remember_me: Option<u8>,
}

impl LoginEndpoint {
    fn from_config(config: &BackendConfig) -> Self {
        Self {
            url: config.login_url.clone(),
            credentials: ServiceCredentials::from_config(config),
            remember_me: config.remember_me,
        }
    }
}

/// Produces valid bearer tokens for the translate and tts services.
#[derive(Clone)]
pub struct CredentialCache {
    http_client: Client,
    store: Arc<TokenStore>,
    translate: Arc<LoginEndpoint>,
    tts: Arc<LoginEndpoint>,
    ttl: chrono::Duration,
}

impl CredentialCache {
    pub fn new(config: &AppConfig, http_client: Client) -> Self {
        Self::with_store(config, http_client, Arc::new(TokenStore::new()))
    }

    /// Builds a cache around an existing store.
    pub fn with_store(config: &AppConfig, http_client: Client, store: Arc<TokenStore>) -> Self {
        Self {
            http_client,
            store,
            translate: Arc::new(LoginEndpoint::from_config(&config.translate)),
            tts: Arc::new(LoginEndpoint::from_config(&config.tts)),
            ttl: chrono::Duration::seconds(config.token.ttl_seconds.min(MAX_TTL_SECONDS) as i64),
        }
    }

    fn endpoint(&self, service: ServiceName) -> &LoginEndpoint {
        match service {
            ServiceName::Translate => &self.translate,
            ServiceName::Tts => &self.tts,
        }
    }

    /// Returns a bearer token for `service`, logging in if no valid one is cached.
    ///
    /// # Errors
    ///
    /// - `ProxyError::Configuration` if the service has no username/password.
    /// - `ProxyError::Authentication` if the login is rejected, unreachable,
    ///   or answers without a token.
    pub async fn get_token(&self, service: ServiceName) -> Result<String> {
        if let Some(entry) = self.store.get(service) {
            debug!(service = %service, expires_in = entry.expires_in_seconds(), "Using cached token");
            crate::metrics::record_token_lookup(service.as_str(), true);
            return Ok(entry.token.clone());
        }

        crate::metrics::record_token_lookup(service.as_str(), false);

        let token = match self.login(service).await {
            Ok(token) => {
                crate::metrics::record_login(service.as_str(), true);
                token
            }
            Err(e) => {
                crate::metrics::record_login(service.as_str(), false);
                return Err(e);
            }
        };

        let entry = self.store.put(service, token, self.ttl);
        info!(service = %service, expires_at = %entry.expires_at, "Logged in to backend service");
        Ok(entry.token.clone())
    }

    /// Drops cached tokens so the next `get_token` performs a fresh login.
    pub fn invalidate(&self, scope: InvalidateScope) -> usize {
        let removed = self.store.invalidate(scope);
        info!(scope = ?scope, removed, "Invalidated cached tokens");
        removed
    }

    /// Shared view of the underlying store.
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Posts the service's credentials to its login endpoint and extracts the token.
    async fn login(&self, service: ServiceName) -> Result<String> {
        let endpoint = self.endpoint(service);
        let credentials = endpoint.credentials.as_ref().ok_or_else(|| {
            ProxyError::Configuration(format!(
                "Credentials for the {service} service are not provisioned; set {service}.username and {service}.password"
            ))
        })?;

        let auth_error = |message: String| ProxyError::Authentication {
            service: service.to_string(),
            message,
        };

        debug!(service = %service, url = %endpoint.url, "Logging in to backend service");

        let body = LoginRequest {
            username: &credentials.username,
            password: &credentials.password,
            remember_me: endpoint.remember_me,
        };

        let started = Instant::now();
        let response = self
            .http_client
            .post(&endpoint.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| auth_error(format!("login request failed: {}", e)))?;

        let status = response.status();
        crate::metrics::record_backend_call(
            service.as_str(),
            "login",
            status.as_u16(),
            started.elapsed().as_secs_f64(),
        );

        let body = response.text().await;

        if !status.is_success() {
            warn!(service = %service, status = status.as_u16(), "Backend login rejected");
            let detail = body.unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(auth_error(format!("HTTP {}: {}", status.as_u16(), sanitize(&detail))));
        }

        let text =
            body.map_err(|e| auth_error(format!("reading login response failed: {}", e)))?;

        debug!(service = %service, response = %sanitize(&text), "Login response");

        let payload: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| auth_error(format!("malformed login response: {}", e)))?;

        first_text_field(&payload, TOKEN_FIELDS)
            .map(str::to_string)
            .ok_or_else(|| auth_error("login response did not include a token".to_string()))
    }
}
