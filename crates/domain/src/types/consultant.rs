//! Consultant entity

use serde::{Deserialize, Serialize};

/// One resource contributing daily capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
    pub id: String,
    pub name: String,
    /// Daily hours; the configured default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
}

impl Consultant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), hours_per_day: None }
    }

    #[must_use]
    pub fn with_hours_per_day(mut self, hours: f64) -> Self {
        self.hours_per_day = Some(hours);
        self
    }

    /// Daily hours this consultant contributes, falling back to `default`
    /// when unset or not a usable non-negative number.
    pub fn daily_hours(&self, default: f64) -> f64 {
        match self.hours_per_day {
            Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
            _ => default,
        }
    }
}
