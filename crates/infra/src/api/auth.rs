//! Client-credentials token cache
//!
//! Holds one bearer token for the remote PSA API and refreshes it shortly
//! before it expires. The cache starts empty and is owned by whoever builds
//! the connector; there is no process-wide token state.

use std::time::Duration;

use async_trait::async_trait;
use capacal_domain::constants::{
    DEFAULT_TOKEN_LIFETIME_SECS, MIN_TOKEN_LIFETIME_SECS, TOKEN_REFRESH_MARGIN_SECS,
};
use capacal_domain::HaloConfig;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use crate::clock::{Clock, SystemClock};
use crate::http::HttpClient;
use crate::normalize::fields::as_number;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Settings for the token request, as read from configuration
#[derive(Debug, Clone, Default)]
pub struct TokenSettings {
    pub auth_base_url: Option<String>,
    pub token_path: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scope: String,
}

impl TokenSettings {
    pub fn from_config(config: &HaloConfig) -> Self {
        Self {
            auth_base_url: config.token_base_url().map(str::to_string),
            token_path: config.token_path.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
        }
    }

    /// Everything needed for a token request, or the names of what is missing.
    fn resolve(&self) -> Result<ResolvedCredentials<'_>, ApiError> {
        let base = present(&self.auth_base_url);
        let client_id = present(&self.client_id);
        let client_secret = present(&self.client_secret);

        match (base, client_id, client_secret) {
            (Some(base), Some(client_id), Some(client_secret)) => Ok(ResolvedCredentials {
                token_url: join_url(base, &self.token_path),
                client_id,
                client_secret,
                scope: &self.scope,
            }),
            _ => {
                let missing: Vec<&str> = [
                    (
                        base.is_none(),
                        "halo.auth_base_url or halo.base_url (HALO_AUTH_BASE_URL / HALO_BASE_URL)",
                    ),
                    (client_id.is_none(), "halo.client_id (HALO_CLIENT_ID)"),
                    (client_secret.is_none(), "halo.client_secret (HALO_CLIENT_SECRET)"),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();
                Err(ApiError::AuthConfiguration(format!("missing {}", missing.join(", "))))
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

struct ResolvedCredentials<'a> {
    token_url: String,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'a str,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at_epoch_seconds: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at_epoch_seconds > now + TOKEN_REFRESH_MARGIN_SECS
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<Value>,
}

impl TokenResponse {
    /// Reported lifetime as a number or numeric string; anything else means
    /// the default.
    fn lifetime_secs(&self) -> i64 {
        let reported = self
            .expires_in
            .as_ref()
            .and_then(as_number)
            .filter(|secs| *secs > 0.0)
            .map_or(DEFAULT_TOKEN_LIFETIME_SECS, |secs| secs as i64);
        reported.max(MIN_TOKEN_LIFETIME_SECS)
    }
}

/// OAuth client-credentials token cache
///
/// Concurrent callers that find the cache empty or stale share a single
/// token request: the first one takes the refresh guard and fetches, the
/// rest wait on the guard and then read the stored token.
pub struct TokenCache<C: Clock = SystemClock> {
    http: HttpClient,
    settings: TokenSettings,
    clock: C,
    cached: RwLock<Option<CachedToken>>,
    refresh_guard: Mutex<()>,
}

impl TokenCache<SystemClock> {
    pub fn new(http: HttpClient, settings: TokenSettings) -> Self {
        Self::with_clock(http, settings, SystemClock)
    }
}

impl<C: Clock> TokenCache<C> {
    pub fn with_clock(http: HttpClient, settings: TokenSettings, clock: C) -> Self {
        Self {
            http,
            settings,
            clock,
            cached: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Expiry of the stored token, if any
    pub async fn expires_at(&self) -> Option<i64> {
        self.cached.read().await.as_ref().map(|cached| cached.expires_at_epoch_seconds)
    }

    /// Return a token that stays valid for more than the refresh margin,
    /// fetching a new one when needed.
    #[instrument(skip(self))]
    pub async fn token(&self) -> Result<String, ApiError> {
        let credentials = self.settings.resolve()?;

        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_guard.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(token) = self.fresh_token().await {
            debug!("token refreshed by concurrent caller");
            return Ok(token);
        }

        let fetched = self.request_token(&credentials).await?;
        let token = fetched.token.clone();
        *self.cached.write().await = Some(fetched);
        Ok(token)
    }

    async fn fresh_token(&self) -> Option<String> {
        let now = self.clock.now_epoch_seconds();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|cached| cached.is_fresh(now))
            .map(|cached| cached.token.clone())
    }

    async fn request_token(
        &self,
        credentials: &ResolvedCredentials<'_>,
    ) -> Result<CachedToken, ApiError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id),
            ("client_secret", credentials.client_secret),
            ("scope", credentials.scope),
        ];
        let request = self.http.request(Method::POST, &credentials.token_url).form(&form);
        let requested_at = self.clock.now_epoch_seconds();

        let timeout = self.http.timeout();
        let response = match tokio::time::timeout(timeout, self.http.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "token request rejected");
            return Err(ApiError::AuthRequest { status: status.as_u16(), body });
        }

        let payload: TokenResponse =
            response.json().await.map_err(|err| ApiError::Parse(err.to_string()))?;
        let lifetime = payload.lifetime_secs();
        let expires_at = requested_at + lifetime;

        info!(lifetime_secs = lifetime, "obtained access token");
        Ok(CachedToken { token: payload.access_token, expires_at_epoch_seconds: expires_at })
    }
}

#[async_trait]
impl<C: Clock> AccessTokenProvider for TokenCache<C> {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.token().await
    }
}

/// Join a base URL and a relative path with exactly one slash between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Plain HTTP client for token and data requests.
pub fn default_http_client(timeout: Duration) -> Result<HttpClient, ApiError> {
    HttpClient::builder().timeout(timeout).build().map_err(ApiError::client_setup)
}
