//! Per-day allocation output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Capacity, booked and free hours for one business day
///
/// Invariant: `available == max(0, capacity - booked)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAllocation {
    pub date: NaiveDate,
    pub booked: f64,
    pub capacity: f64,
    pub available: f64,
}

impl DayAllocation {
    /// Build an allocation, deriving `available` from capacity and booked.
    pub fn new(date: NaiveDate, booked: f64, capacity: f64) -> Self {
        Self { date, booked, capacity, available: (capacity - booked).max(0.0) }
    }
}

/// Whether a day has enough free hours to take on more work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Free hours at or above the threshold
    Open,
    /// Free hours below the threshold
    Tight,
}

impl_label_conversions!(DayStatus {
    Open => "open",
    Tight => "tight",
});

impl DayStatus {
    pub fn classify(day: &DayAllocation, threshold_hours: f64) -> Self {
        if day.available >= threshold_hours {
            Self::Open
        } else {
            Self::Tight
        }
    }
}
