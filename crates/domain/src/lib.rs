//! # Capacal Domain
//!
//! Business domain types for the consultant availability calendar.
//!
//! This crate contains:
//! - Normalized entities (`Consultant`, `Project`) and the per-day
//!   allocation output (`DayAllocation`)
//! - Domain error types and Result definitions
//! - Configuration structures (remote API, calendar defaults, field mapping)
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Capacal crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
