//! # Capacal Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Business calendar and uniform hour distribution
//! - The availability allocation engine
//! - Calendar settings resolution and day classification
//! - Port interfaces for consultant and project sources
//! - The month view service that ties them together
//!
//! ## Architecture Principles
//! - Only depends on `capacal-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Allocation never fails; degraded input yields degraded output

pub mod availability;
pub mod calendar;
pub mod distribution;
pub mod ports;
pub mod service;
pub mod settings;

pub use availability::compute_availability;
pub use calendar::{business_days, is_business_day, month_days, HolidaySet};
pub use distribution::distribute;
pub use ports::{ConsultantSource, ProjectSource};
pub use service::{AvailabilityService, DayEntry, MonthView};
pub use settings::{CalendarSettings, ProjectBoard};
