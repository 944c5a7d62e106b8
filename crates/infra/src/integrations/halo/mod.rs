//! HaloPSA integration
//!
//! Wires configuration into a token cache, an authenticated list client and
//! the two record sources the availability service consumes.
//!
//! # Usage
//!
//! ```no_run
//! use capacal_core::{AvailabilityService, CalendarSettings};
//! use capacal_infra::integrations::halo::HaloConnector;
//!
//! # async fn example(config: capacal_domain::Config) -> capacal_domain::Result<()> {
//! let connector = HaloConnector::from_config(&config)?;
//! let service = AvailabilityService::new(
//!     connector.consultant_source(),
//!     connector.project_source(),
//!     config.calendar.default_hours_per_day,
//! );
//! let view = service.month_view(2025, 3, &CalendarSettings::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod sources;

use std::sync::Arc;
use std::time::Duration;

use capacal_domain::{CapacalError, Config, Result};

use crate::api::{default_http_client, ApiClient, ApiClientConfig, TokenCache, TokenSettings};
use crate::normalize::{ConsultantNormalizer, ProjectNormalizer};
pub use sources::{HaloConsultantSource, HaloProjectSource};

/// Shared client plus the per-entity sources built on it
pub struct HaloConnector {
    consultants: Arc<HaloConsultantSource>,
    projects: Arc<HaloProjectSource>,
}

impl HaloConnector {
    /// Build the connector without touching the network.
    ///
    /// Missing credentials are reported by the first fetch, not here.
    ///
    /// # Errors
    /// Returns `CapacalError::Config` if an HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.halo.timeout_seconds.max(1));
        let token_http = default_http_client(timeout).map_err(CapacalError::from)?;
        let tokens = Arc::new(TokenCache::new(token_http, TokenSettings::from_config(&config.halo)));

        let client = Arc::new(
            ApiClient::builder()
                .config(ApiClientConfig::from_config(&config.halo))
                .auth(tokens)
                .build()
                .map_err(CapacalError::from)?,
        );

        let consultants = Arc::new(HaloConsultantSource::new(
            client.clone(),
            config.halo.consultants.clone(),
            ConsultantNormalizer::new(config.mapping.consultant.clone()),
        ));
        let projects = Arc::new(HaloProjectSource::new(
            client,
            config.halo.projects.clone(),
            ProjectNormalizer::new(config.mapping.project.clone(), config.mapping.type_labels.clone()),
        ));

        Ok(Self { consultants, projects })
    }

    pub fn consultant_source(&self) -> Arc<HaloConsultantSource> {
        self.consultants.clone()
    }

    pub fn project_source(&self) -> Arc<HaloProjectSource> {
        self.projects.clone()
    }
}
