//! Port interfaces for remote data
//!
//! Infrastructure supplies the implementations; the core only needs
//! already-normalized entities.

use async_trait::async_trait;
use capacal_domain::{Consultant, Project, Result};

/// Source of consultants contributing capacity
#[async_trait]
pub trait ConsultantSource: Send + Sync {
    /// Fetch every known consultant
    async fn consultants(&self) -> Result<Vec<Consultant>>;
}

/// Source of project commitments
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch every known project
    async fn projects(&self) -> Result<Vec<Project>>;
}
