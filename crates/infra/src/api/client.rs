//! Authenticated list fetcher for the remote PSA API
//!
//! Issues bearer-authenticated GET requests against the configured base URL
//! and unwraps list responses with an [`EnvelopeExtractor`]. Requests are
//! sent once; failures go back to the caller.

use std::sync::Arc;
use std::time::Duration;

use capacal_domain::constants::DEFAULT_HTTP_TIMEOUT_SECS;
use capacal_domain::HaloConfig;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::auth::{join_url, AccessTokenProvider};
use super::envelope::EnvelopeExtractor;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for data requests (e.g., "https://psa.example.com")
    pub base_url: Option<String>,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: None, timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS) }
    }
}

impl ApiClientConfig {
    pub fn from_config(config: &HaloConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds.max(1)),
        }
    }

    fn require_base_url(&self) -> Result<&str, ApiError> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .ok_or_else(|| {
                ApiError::AuthConfiguration("missing halo.base_url (HALO_BASE_URL)".to_string())
            })
    }
}

/// Bearer-authenticated API client
pub struct ApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created
    pub fn new(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http_client =
            HttpClient::builder().timeout(config.timeout).build().map_err(ApiError::client_setup)?;

        Ok(Self { http_client, auth, config })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// GET `path` with `query` and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// `AuthConfiguration` when the base URL or credentials are missing
    /// (before any request), `AuthRequest` from the token endpoint, `Fetch`
    /// on a non-success status, `Timeout`, `Network` or `Parse` otherwise.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let base = self.config.require_base_url()?;
        let token = self.auth.access_token().await?;
        let url = join_url(base, path);

        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, &url).bearer_auth(token).query(query);

        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.http_client.send(request)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), path = %path, "API returned non-success status");
            return Err(ApiError::Fetch { status: status.as_u16(), url, body });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// GET a list endpoint and unwrap its records.
    ///
    /// An unrecognized envelope yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`].
    #[instrument(skip(self, query, extractor), fields(path = %path))]
    pub async fn fetch_list(
        &self,
        path: &str,
        query: &[(String, String)],
        extractor: &EnvelopeExtractor,
    ) -> Result<Vec<Value>, ApiError> {
        let payload = self.get_json(path, query).await?;
        let records = extractor.extract(payload);
        info!(path = %path, count = records.len(), "fetched list");
        Ok(records)
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let auth = self
            .auth
            .ok_or_else(|| ApiError::AuthConfiguration("Auth provider not set".to_string()))?;

        ApiClient::new(config, auth)
    }
}
