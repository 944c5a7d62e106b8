//! Project entity and commitment types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// How a project consumes consultant capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Time-boxed; budget spread over its dated business days
    Scooped,
    /// Ongoing; budget spread over every business day of the queried month
    Retainer,
    /// Informational only; never books hours
    Request,
}

impl_label_conversions!(ProjectType {
    Scooped => "scooped",
    Retainer => "retainer",
    Request => "request",
});

/// A commitment that may book consultant hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_hours: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            id: id.into(),
            customer: None,
            name: name.into(),
            project_type,
            budget_hours: None,
            start_date: None,
            end_date: None,
        }
    }

    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn with_budget(mut self, hours: f64) -> Self {
        self.budget_hours = Some(hours);
        self
    }

    #[must_use]
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Budget usable for allocation: absent, negative or non-finite is 0.
    pub fn effective_budget(&self) -> f64 {
        match self.budget_hours {
            Some(hours) if hours.is_finite() && hours > 0.0 => hours,
            _ => 0.0,
        }
    }

    /// Inclusive date range, only when both ends are known.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    /// `"Customer – Name"` when a customer is known, otherwise the name.
    pub fn display_name(&self) -> String {
        match &self.customer {
            Some(customer) => format!("{customer} – {}", self.name),
            None => self.name.clone(),
        }
    }
}
