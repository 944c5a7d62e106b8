//! Configuration loading and management
//!
//! This module provides utilities for loading application configuration
//! from environment variables and files, plus the calendar settings file.

pub mod loader;
pub mod settings;

// Re-export commonly used items
pub use loader::{apply_env_overrides, load, load_from_env, load_from_file, probe_config_paths};
pub use settings::load_settings;
