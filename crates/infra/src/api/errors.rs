//! API-specific error types
//!
//! Classifies failures of the token and data endpoints. Nothing in this
//! crate retries; the category and retry hints are for callers.

use std::time::Duration;

use capacal_domain::CapacalError;
use thiserror::Error;

/// Categories of API errors for retry decisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Credentials or base URL missing - fix configuration first
    Config,
    /// Token endpoint rejected the request (401, 403, 400)
    Authentication,
    /// Rate limiting (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors and timeouts - retryable
    Network,
    /// Unreadable response body
    Parse,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required credentials or base URL are missing. Raised before any
    /// network call is made.
    #[error("Authentication is not configured: {0}")]
    AuthConfiguration(String),

    /// The local HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    /// Token endpoint answered with a non-success status.
    #[error("Token request failed with status {status}: {body}")]
    AuthRequest { status: u16, body: String },

    /// Data endpoint answered with a non-success status.
    #[error("{url} returned status {status}")]
    Fetch { status: u16, url: String, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::AuthConfiguration(_) | Self::ClientSetup(_) => ApiErrorCategory::Config,
            Self::AuthRequest { status, .. } if *status == 429 => ApiErrorCategory::RateLimit,
            Self::AuthRequest { status, .. } if *status >= 500 => ApiErrorCategory::Server,
            Self::AuthRequest { .. } => ApiErrorCategory::Authentication,
            Self::Fetch { status, .. } => match *status {
                401 | 403 => ApiErrorCategory::Authentication,
                429 => ApiErrorCategory::RateLimit,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Parse(_) => ApiErrorCategory::Parse,
        }
    }

    /// Check if repeating the call could succeed without a config change
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }

    /// Get suggested retry delay in seconds
    pub fn retry_delay_secs(&self) -> u64 {
        match self.category() {
            ApiErrorCategory::RateLimit => 60,
            ApiErrorCategory::Server => 10,
            ApiErrorCategory::Network => 5,
            ApiErrorCategory::Config
            | ApiErrorCategory::Authentication
            | ApiErrorCategory::Client
            | ApiErrorCategory::Parse => 0,
        }
    }

    /// Wrap a failure to build the underlying HTTP client
    pub fn client_setup(err: CapacalError) -> Self {
        Self::ClientSetup(err.to_string())
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRequest { status, .. } | Self::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CapacalError> for ApiError {
    fn from(err: CapacalError) -> Self {
        match err {
            CapacalError::Config(message) => Self::AuthConfiguration(message),
            CapacalError::InvalidInput(message) => Self::Parse(message),
            CapacalError::Network(message)
            | CapacalError::Auth(message)
            | CapacalError::Internal(message) => Self::Network(message),
        }
    }
}

impl From<ApiError> for CapacalError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::Config => Self::Config(message),
            ApiErrorCategory::Authentication => Self::Auth(message),
            ApiErrorCategory::Client | ApiErrorCategory::Parse => Self::InvalidInput(message),
            ApiErrorCategory::RateLimit
            | ApiErrorCategory::Server
            | ApiErrorCategory::Network => Self::Network(message),
        }
    }
}
