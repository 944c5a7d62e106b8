//! Domain types and models
//!
//! Entities arrive already normalized from the remote PSA system; nothing in
//! this module mutates them after construction.

pub mod allocation;
pub mod consultant;
pub mod project;

pub use allocation::{DayAllocation, DayStatus};
pub use consultant::Consultant;
pub use project::{Project, ProjectType};
