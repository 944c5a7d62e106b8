//! Calendar settings resolution
//!
//! User preferences (which consultants count, the "open day" threshold and
//! the holiday list) are stored elsewhere; this module only decides what the
//! stored values mean.

use std::collections::HashSet;

use capacal_domain::constants::DEFAULT_THRESHOLD_HOURS;
use capacal_domain::{Consultant, DayAllocation, DayStatus, Project, ProjectType};
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_holiday, HolidaySet};

/// Stored calendar preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Consultant ids counted towards capacity; empty means everyone
    pub included_consultants: Vec<String>,
    /// Minimum free hours for a day to count as open
    pub threshold_hours: f64,
    /// ISO `YYYY-MM-DD` dates
    pub holidays: Vec<String>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            included_consultants: Vec::new(),
            threshold_hours: DEFAULT_THRESHOLD_HOURS,
            holidays: Vec::new(),
        }
    }
}

impl CalendarSettings {
    /// Ids that contribute capacity. An empty selection includes every
    /// known consultant.
    pub fn resolve_included_ids(&self, consultants: &[Consultant]) -> HashSet<String> {
        if self.included_consultants.is_empty() {
            consultants.iter().map(|c| c.id.clone()).collect()
        } else {
            self.included_consultants.iter().cloned().collect()
        }
    }

    /// Threshold when positive and finite, otherwise the default.
    pub fn effective_threshold(&self) -> f64 {
        if self.threshold_hours.is_finite() && self.threshold_hours > 0.0 {
            self.threshold_hours
        } else {
            DEFAULT_THRESHOLD_HOURS
        }
    }

    pub fn holiday_set(&self) -> HolidaySet {
        HolidaySet::from_entries(&self.holidays)
    }

    /// Replace the holiday list from free text, one date per line.
    /// Lines that are not `YYYY-MM-DD` dates are discarded.
    pub fn set_holidays_from_text(&mut self, text: &str) {
        self.holidays = parse_holiday_lines(text);
    }

    pub fn classify(&self, day: &DayAllocation) -> DayStatus {
        DayStatus::classify(day, self.effective_threshold())
    }
}

/// Keep the valid `YYYY-MM-DD` lines of `text`, trimmed, in input order.
pub fn parse_holiday_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| parse_holiday(line).is_some())
        .map(str::to_string)
        .collect()
}

/// Projects grouped by type for side panels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectBoard {
    pub retainers: Vec<Project>,
    pub requests: Vec<Project>,
    pub scooped: Vec<Project>,
}

impl ProjectBoard {
    pub fn partition(projects: &[Project]) -> Self {
        let mut board = Self::default();
        for project in projects {
            let bucket = match project.project_type {
                ProjectType::Retainer => &mut board.retainers,
                ProjectType::Request => &mut board.requests,
                ProjectType::Scooped => &mut board.scooped,
            };
            bucket.push(project.clone());
        }
        board
    }

    /// Monthly retainer hours in total
    pub fn retainer_hours(&self) -> f64 {
        self.retainers.iter().map(Project::effective_budget).sum()
    }
}
