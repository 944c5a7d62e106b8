//! Business calendar
//!
//! Day enumeration works on `NaiveDate`, so month boundaries are plain
//! calendar arithmetic in the proleptic Gregorian calendar and never shift
//! with the host time zone.

use std::collections::HashSet;

use capacal_domain::constants::HOLIDAY_PATTERN;
use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

static HOLIDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(HOLIDAY_PATTERN).expect("HOLIDAY_RE should compile - this is a bug"));

/// Dates excluded from business-day status regardless of weekday
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet(HashSet<NaiveDate>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ISO `YYYY-MM-DD` strings.
    ///
    /// Entries are trimmed; anything not matching the pattern or not naming a
    /// real calendar date is dropped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(entries.into_iter().filter_map(|entry| parse_holiday(entry.as_ref())).collect())
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse one holiday entry, enforcing the canonical `YYYY-MM-DD` shape.
pub fn parse_holiday(entry: &str) -> Option<NaiveDate> {
    let entry = entry.trim();
    if !HOLIDAY_RE.is_match(entry) {
        return None;
    }
    NaiveDate::parse_from_str(entry, "%Y-%m-%d").ok()
}

/// Every calendar day of `month` (1-12) in ascending order.
///
/// An out-of-range month or year yields an empty list.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first.iter_days().take_while(|day| day.month() == month && day.year() == year).collect()
}

/// Monday to Friday and not a holiday.
pub fn is_business_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }
    !holidays.contains(&date)
}

/// Business days of the month, ascending.
pub fn business_days(year: i32, month: u32, holidays: &HolidaySet) -> Vec<NaiveDate> {
    month_days(year, month).into_iter().filter(|day| is_business_day(*day, holidays)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn month_days_has_correct_length_and_order() {
        let expected = [(1, 31), (2, 28), (3, 31), (4, 30), (6, 30), (9, 30), (11, 30), (12, 31)];
        for (month, len) in expected {
            let days = month_days(2025, month);
            assert_eq!(days.len(), len, "month {month}");
            assert!(days.windows(2).all(|w| w[0] < w[1]));
            assert!(days.iter().all(|d| d.month() == month && d.year() == 2025));
            assert_eq!(days[0].day(), 1);
        }
    }

    #[test]
    fn month_days_handles_leap_years() {
        assert_eq!(month_days(2024, 2).len(), 29);
        assert_eq!(month_days(2000, 2).len(), 29);
        assert_eq!(month_days(1900, 2).len(), 28);
    }

    #[test]
    fn month_days_rejects_out_of_range_month() {
        assert!(month_days(2025, 0).is_empty());
        assert!(month_days(2025, 13).is_empty());
    }

    #[test]
    fn weekends_are_never_business_days() {
        let none = HolidaySet::new();
        for day in month_days(2025, 3) {
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(is_business_day(day, &none), !weekend, "{day}");
        }
    }

    #[test]
    fn holidays_are_excluded() {
        let holidays = HolidaySet::from_entries(["2025-12-25", "2025-12-26"]);
        assert!(!is_business_day(date("2025-12-25"), &holidays));
        assert!(!is_business_day(date("2025-12-26"), &holidays));
        assert!(is_business_day(date("2025-12-24"), &holidays));
    }

    #[test]
    fn malformed_holiday_entries_are_dropped() {
        let holidays =
            HolidaySet::from_entries(["2025-1-6", "06/01/2025", "2025-02-30", " 2025-01-06 ", ""]);
        assert_eq!(holidays.len(), 1);
        assert!(holidays.contains(&date("2025-01-06")));
    }

    #[test]
    fn business_days_in_march_2025() {
        let days = business_days(2025, 3, &HolidaySet::new());
        assert_eq!(days.len(), 21);
        assert_eq!(days[0], date("2025-03-03"));
        assert_eq!(days[days.len() - 1], date("2025-03-31"));
    }
}
