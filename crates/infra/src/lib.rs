//! # Capacal Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client and the remote PSA API client (token cache, list fetcher)
//! - Field-mapped normalizers from raw records to domain entities
//! - HaloPSA-backed consultant and project sources
//! - Configuration and calendar settings loading
//!
//! ## Architecture
//! - Implements traits defined in `capacal-core`
//! - Depends on `capacal-domain` and `capacal-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod clock;
pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod normalize;

// Re-export commonly used items
pub use api::{AccessTokenProvider, ApiClient, ApiError, TokenCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::halo::{HaloConnector, HaloConsultantSource, HaloProjectSource};
