//! Remote PSA API access
//!
//! - `auth`: client-credentials token cache with single-flight refresh
//! - `client`: bearer-authenticated GET and list fetching
//! - `envelope`: ordered list-envelope extraction
//! - `errors`: error taxonomy with retry hints
//!
//! Nothing here retries. Every external call is bounded by a timeout.

pub mod auth;
pub mod client;
pub mod envelope;
pub mod errors;

pub use auth::{default_http_client, AccessTokenProvider, TokenCache, TokenSettings};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use envelope::{EnvelopeExtractor, EnvelopeShape};
pub use errors::{ApiError, ApiErrorCategory};
