//! Raw remote records to domain entities
//!
//! Normalizers apply the configured field mapping once per record. They
//! never fail on bad data: a record without an id is rejected, every other
//! malformed field degrades to absent.

pub mod consultant;
pub mod fields;
pub mod project;

pub use consultant::ConsultantNormalizer;
pub use project::ProjectNormalizer;
