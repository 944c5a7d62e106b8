//! Month view service - fetch, resolve settings, allocate

use std::sync::Arc;

use capacal_domain::{Consultant, DayAllocation, DayStatus, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::availability::compute_availability;
use crate::ports::{ConsultantSource, ProjectSource};
use crate::settings::{CalendarSettings, ProjectBoard};

/// Everything needed to render one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub threshold_hours: f64,
    pub days: Vec<DayEntry>,
    pub consultants: Vec<Consultant>,
    pub board: ProjectBoard,
}

/// One business day with its open/tight status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    #[serde(flatten)]
    pub allocation: DayAllocation,
    pub status: DayStatus,
}

/// Availability service
pub struct AvailabilityService {
    consultants: Arc<dyn ConsultantSource>,
    projects: Arc<dyn ProjectSource>,
    default_hours_per_day: f64,
}

impl AvailabilityService {
    pub fn new(
        consultants: Arc<dyn ConsultantSource>,
        projects: Arc<dyn ProjectSource>,
        default_hours_per_day: f64,
    ) -> Self {
        Self { consultants, projects, default_hours_per_day }
    }

    /// Fetch consultants and projects concurrently and build the month.
    ///
    /// Fetch failures propagate; allocation itself cannot fail.
    #[instrument(skip(self, settings))]
    pub async fn month_view(
        &self,
        year: i32,
        month: u32,
        settings: &CalendarSettings,
    ) -> Result<MonthView> {
        let (consultants, projects) =
            futures::try_join!(self.consultants.consultants(), self.projects.projects())?;

        debug!(
            consultants = consultants.len(),
            projects = projects.len(),
            "loaded remote data for month view"
        );

        let included = settings.resolve_included_ids(&consultants);
        let holidays = settings.holiday_set();
        let threshold_hours = settings.effective_threshold();

        let days = compute_availability(
            year,
            month,
            &consultants,
            &projects,
            &included,
            self.default_hours_per_day,
            &holidays,
        )
        .into_iter()
        .map(|allocation| {
            let status = DayStatus::classify(&allocation, threshold_hours);
            DayEntry { allocation, status }
        })
        .collect();

        Ok(MonthView {
            year,
            month,
            threshold_hours,
            days,
            board: ProjectBoard::partition(&projects),
            consultants,
        })
    }
}
