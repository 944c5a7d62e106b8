//! Calendar settings file
//!
//! The included consultants, the open-day threshold and the holiday list
//! live in a small JSON (or TOML) document next to the main config.

use std::path::Path;

use capacal_core::CalendarSettings;
use capacal_domain::{CapacalError, Result};

use crate::errors::InfraError;

/// Read calendar settings from `path`
///
/// `None` or a missing file yields the defaults (everyone included, 8 hour
/// threshold, no holidays). Holiday entries that are not `YYYY-MM-DD` dates
/// are dropped.
///
/// # Errors
/// Returns `CapacalError::Config` when the file exists but cannot be read
/// or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<CalendarSettings> {
    let Some(path) = path else {
        return Ok(CalendarSettings::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
        return Ok(CalendarSettings::default());
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| CapacalError::from(InfraError::from(e)))?;

    let mut settings: CalendarSettings = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| CapacalError::Config(format!("Invalid TOML settings: {}", e)))?,
        _ => serde_json::from_str(&contents)
            .map_err(|e| CapacalError::Config(format!("Invalid JSON settings: {}", e)))?,
    };

    let before = settings.holidays.len();
    let text = settings.holidays.join("\n");
    settings.set_holidays_from_text(&text);
    if settings.holidays.len() < before {
        tracing::warn!(dropped = before - settings.holidays.len(), "Ignoring invalid holiday entries");
    }

    tracing::info!(
        path = %path.display(),
        included = settings.included_consultants.len(),
        holidays = settings.holidays.len(),
        "Loaded calendar settings"
    );
    Ok(settings)
}
