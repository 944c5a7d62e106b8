//! Uniform hour distribution

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Spread `total` hours evenly over `days`.
///
/// Each day receives exactly `total / days.len()`; nothing is rounded and no
/// remainder is redistributed. A non-positive total or an empty day list
/// contributes nothing.
pub fn distribute(total: f64, days: &[NaiveDate]) -> BTreeMap<NaiveDate, f64> {
    if total.is_nan() || total <= 0.0 || days.is_empty() {
        return BTreeMap::new();
    }
    let per_day = total / days.len() as f64;
    days.iter().map(|day| (*day, per_day)).collect()
}
