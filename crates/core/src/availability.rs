//! Availability allocation engine
//!
//! Turns consultants, commitments and a month into one `DayAllocation` per
//! business day. The computation is pure: identical inputs always produce
//! identical output, and no input can make it fail. Missing budgets count as
//! zero and scooped projects without both dates are left out.
//!
//! Scooped budgets are re-spread per queried month. A project running from
//! mid-March to mid-April books its whole budget over its March business
//! days when March is queried, and again over its April business days when
//! April is queried. Nothing carries over between months.

use std::collections::{BTreeMap, HashSet};

use capacal_domain::{Consultant, DayAllocation, Project, ProjectType};
use chrono::NaiveDate;
use tracing::trace;

use crate::calendar::{business_days, is_business_day, HolidaySet};
use crate::distribution::distribute;

/// Compute capacity, booked and available hours for every business day of
/// `month` (1-12).
///
/// Capacity is the sum of daily hours of every consultant whose id is in
/// `included_ids` (`default_hours_per_day` when a consultant has none) and is
/// the same on every day. Request projects are ignored.
pub fn compute_availability(
    year: i32,
    month: u32,
    consultants: &[Consultant],
    projects: &[Project],
    included_ids: &HashSet<String>,
    default_hours_per_day: f64,
    holidays: &HolidaySet,
) -> Vec<DayAllocation> {
    let days = business_days(year, month, holidays);
    let capacity = daily_capacity(consultants, included_ids, default_hours_per_day);

    let scooped = scooped_bookings(projects, &days, holidays);
    let retainer = retainer_bookings(projects, &days);

    trace!(
        year,
        month,
        business_days = days.len(),
        capacity,
        scooped_days = scooped.len(),
        "computed month allocation"
    );

    days.into_iter()
        .map(|day| {
            let booked = scooped.get(&day).copied().unwrap_or(0.0)
                + retainer.get(&day).copied().unwrap_or(0.0);
            DayAllocation::new(day, booked, capacity)
        })
        .collect()
}

fn daily_capacity(
    consultants: &[Consultant],
    included_ids: &HashSet<String>,
    default_hours_per_day: f64,
) -> f64 {
    let default = if default_hours_per_day.is_finite() { default_hours_per_day.max(0.0) } else { 0.0 };
    consultants
        .iter()
        .filter(|consultant| included_ids.contains(&consultant.id))
        .map(|consultant| consultant.daily_hours(default))
        .sum()
}

/// Each dated scooped project spreads its budget over its own business days
/// inside the month.
fn scooped_bookings(
    projects: &[Project],
    days: &[NaiveDate],
    holidays: &HolidaySet,
) -> BTreeMap<NaiveDate, f64> {
    let mut booked = BTreeMap::new();

    for project in projects.iter().filter(|p| p.project_type == ProjectType::Scooped) {
        let Some((start, end)) = project.date_range() else {
            continue;
        };
        let window: Vec<NaiveDate> = days
            .iter()
            .copied()
            .filter(|day| *day >= start && *day <= end)
            .filter(|day| is_business_day(*day, holidays))
            .collect();

        for (day, hours) in distribute(project.effective_budget(), &window) {
            *booked.entry(day).or_insert(0.0) += hours;
        }
    }

    booked
}

/// All retainer budgets together, spread over every business day of the
/// month regardless of the retainers' own dates.
fn retainer_bookings(projects: &[Project], days: &[NaiveDate]) -> BTreeMap<NaiveDate, f64> {
    let total: f64 = projects
        .iter()
        .filter(|p| p.project_type == ProjectType::Retainer)
        .map(Project::effective_budget)
        .sum();
    distribute(total, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn team() -> Vec<Consultant> {
        vec![Consultant::new("c1", "Ada"), Consultant::new("c2", "Grace")]
    }

    fn all_ids(consultants: &[Consultant]) -> HashSet<String> {
        consultants.iter().map(|c| c.id.clone()).collect()
    }

    // April 2025 has 22 weekdays; dropping Good Friday and Easter Monday
    // leaves 20 business days.
    fn april_holidays() -> HolidaySet {
        HolidaySet::from_entries(["2025-04-18", "2025-04-21"])
    }

    #[test]
    fn retainer_spreads_over_every_business_day() {
        let consultants = team();
        let projects = vec![Project::new("r1", "Support", ProjectType::Retainer).with_budget(80.0)];

        let days = compute_availability(
            2025,
            4,
            &consultants,
            &projects,
            &all_ids(&consultants),
            8.0,
            &april_holidays(),
        );

        assert_eq!(days.len(), 20);
        for day in &days {
            assert_eq!(day.capacity, 16.0);
            assert!((day.booked - 4.0).abs() < 1e-9);
            assert!((day.available - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn scooped_project_books_only_its_own_days() {
        let consultants = team();
        let projects = vec![Project::new("s1", "Rollout", ProjectType::Scooped)
            .with_budget(10.0)
            .with_dates(date("2025-03-11"), date("2025-03-12"))];

        let days = compute_availability(
            2025,
            3,
            &consultants,
            &projects,
            &all_ids(&consultants),
            8.0,
            &HolidaySet::new(),
        );

        for day in &days {
            if day.date == date("2025-03-11") || day.date == date("2025-03-12") {
                assert_eq!(day.booked, 5.0);
                assert_eq!(day.available, 11.0);
            } else {
                assert_eq!(day.booked, 0.0);
                assert_eq!(day.available, 16.0);
            }
        }
    }

    #[test]
    fn scooped_range_spanning_weekend_uses_business_days_only() {
        let consultants = team();
        // Fri 7th to Mon 10th: two business days
        let projects = vec![Project::new("s1", "Cutover", ProjectType::Scooped)
            .with_budget(12.0)
            .with_dates(date("2025-03-07"), date("2025-03-10"))];

        let days = compute_availability(
            2025,
            3,
            &consultants,
            &projects,
            &all_ids(&consultants),
            8.0,
            &HolidaySet::new(),
        );
        let booked: f64 = days.iter().map(|d| d.booked).sum();

        assert!((booked - 12.0).abs() < 1e-9);
        assert_eq!(days.iter().filter(|d| d.booked > 0.0).count(), 2);
    }

    #[test]
    fn scooped_budget_is_respread_per_month() {
        let consultants = team();
        let ids = all_ids(&consultants);
        let projects = vec![Project::new("s1", "Upgrade", ProjectType::Scooped)
            .with_budget(30.0)
            .with_dates(date("2025-03-27"), date("2025-04-02"))];

        let march = compute_availability(2025, 3, &consultants, &projects, &ids, 8.0, &HolidaySet::new());
        let april = compute_availability(2025, 4, &consultants, &projects, &ids, 8.0, &HolidaySet::new());

        let march_total: f64 = march.iter().map(|d| d.booked).sum();
        let april_total: f64 = april.iter().map(|d| d.booked).sum();
        assert!((march_total - 30.0).abs() < 1e-9);
        assert!((april_total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn scooped_outside_month_or_without_dates_contributes_nothing() {
        let consultants = team();
        let mut undated = Project::new("s2", "Someday", ProjectType::Scooped).with_budget(40.0);
        undated.start_date = Some(date("2025-03-03"));
        let projects = vec![
            Project::new("s1", "Last year", ProjectType::Scooped)
                .with_budget(40.0)
                .with_dates(date("2024-03-01"), date("2024-03-31")),
            undated,
        ];

        let days = compute_availability(
            2025,
            3,
            &consultants,
            &projects,
            &all_ids(&consultants),
            8.0,
            &HolidaySet::new(),
        );

        assert!(days.iter().all(|d| d.booked == 0.0));
    }

    #[test]
    fn requests_never_book_hours() {
        let consultants = team();
        let projects = vec![Project::new("q1", "Pre-sales", ProjectType::Request)
            .with_budget(500.0)
            .with_dates(date("2025-03-01"), date("2025-03-31"))];

        let days = compute_availability(
            2025,
            3,
            &consultants,
            &projects,
            &all_ids(&consultants),
            8.0,
            &HolidaySet::new(),
        );

        assert!(days.iter().all(|d| d.booked == 0.0 && d.available == 16.0));
    }

    #[test]
    fn holiday_is_absent_from_output() {
        let holidays = HolidaySet::from_entries(["2025-03-11"]);
        let days = compute_availability(2025, 3, &team(), &[], &HashSet::new(), 8.0, &holidays);

        assert!(days.iter().all(|d| d.date != date("2025-03-11")));
        assert_eq!(days.len(), 20);
    }

    #[test]
    fn no_included_consultants_floors_available_at_zero() {
        let projects = vec![Project::new("r1", "Support", ProjectType::Retainer).with_budget(80.0)];
        let days =
            compute_availability(2025, 3, &team(), &projects, &HashSet::new(), 8.0, &HolidaySet::new());

        for day in &days {
            assert_eq!(day.capacity, 0.0);
            assert!(day.booked > 0.0);
            assert_eq!(day.available, 0.0);
        }
    }

    #[test]
    fn capacity_uses_individual_hours_and_default() {
        let consultants = vec![
            Consultant::new("c1", "Ada").with_hours_per_day(6.0),
            Consultant::new("c2", "Grace"),
            Consultant::new("c3", "Excluded").with_hours_per_day(8.0),
        ];
        let included: HashSet<String> = ["c1".to_string(), "c2".to_string()].into_iter().collect();

        let days =
            compute_availability(2025, 3, &consultants, &[], &included, 7.5, &HolidaySet::new());
        assert!(days.iter().all(|d| d.capacity == 13.5));
    }

    #[test]
    fn invariants_hold_and_output_is_deterministic() {
        let consultants = team();
        let ids = all_ids(&consultants);
        let projects = vec![
            Project::new("r1", "Support", ProjectType::Retainer).with_budget(300.0),
            Project::new("s1", "Big bang", ProjectType::Scooped)
                .with_budget(90.0)
                .with_dates(date("2025-03-03"), date("2025-03-05")),
            Project::new("s2", "Broken", ProjectType::Scooped).with_budget(f64::NAN),
        ];

        let first = compute_availability(2025, 3, &consultants, &projects, &ids, 8.0, &HolidaySet::new());
        let second = compute_availability(2025, 3, &consultants, &projects, &ids, 8.0, &HolidaySet::new());

        assert_eq!(first, second);
        for day in &first {
            assert!(day.available >= 0.0);
            assert_eq!(day.available, (day.capacity - day.booked).max(0.0));
        }
    }
}
