//! Read-only, stateless views over a ledger snapshot.
//!
//! Everything here is a pure function of the ledger passed in; nothing is
//! memoized, so views are always consistent with the last mutation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::Ledger;
use crate::models::{DateRollup, MacroTotals};

/// Sums each macro field over all entries on the given date.
#[must_use]
pub fn day_totals(ledger: &Ledger, date: NaiveDate) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for entry in ledger.entries_for(date) {
        totals.add_entry(entry);
    }
    totals
}

/// Fraction of the daily calorie goal reached, capped at 1.0.
///
/// A non-positive goal would divide badly; treat it as already met instead
/// of propagating a NaN into the progress bar.
#[must_use]
pub fn goal_progress(total_calories: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 1.0;
    }
    (total_calories / goal).clamp(0.0, 1.0)
}

/// Groups all entries by date, summing macros per group. One row per
/// distinct date present in the ledger, ascending for charting; the display
/// layer may re-sort descending for tables.
#[must_use]
pub fn range_rollup(ledger: &Ledger) -> Vec<DateRollup> {
    let mut by_date: BTreeMap<NaiveDate, MacroTotals> = BTreeMap::new();
    for entry in ledger.entries() {
        by_date.entry(entry.date).or_default().add_entry(entry);
    }
    by_date
        .into_iter()
        .map(|(date, t)| DateRollup {
            date,
            calories: t.calories,
            protein_g: t.protein_g,
            carbs_g: t.carbs_g,
            fat_g: t.fat_g,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEntry;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(d: &str, name: &str, c: f64, p: f64, cb: f64, f: f64) -> NewEntry {
        NewEntry {
            date: date(d),
            name: name.to_string(),
            calories: c,
            protein_g: p,
            carbs_g: cb,
            fat_g: f,
        }
    }

    #[test]
    fn test_day_totals_empty_ledger_is_zero() {
        let ledger = Ledger::default();
        let totals = day_totals(&ledger, date("2024-01-01"));
        assert_eq!(totals, MacroTotals::default());
        assert!(range_rollup(&ledger).is_empty());
    }

    #[test]
    fn test_day_totals_single_entry() {
        let mut ledger = Ledger::default();
        ledger.append(entry("2024-01-01", "Egg", 70.0, 6.0, 0.0, 5.0));

        let totals = day_totals(&ledger, date("2024-01-01"));
        assert_eq!(totals.calories, 70.0);
        assert_eq!(totals.protein_g, 6.0);
        assert_eq!(totals.carbs_g, 0.0);
        assert_eq!(totals.fat_g, 5.0);

        // Any other date stays zero
        assert_eq!(
            day_totals(&ledger, date("2024-01-02")),
            MacroTotals::default()
        );
    }

    #[test]
    fn test_append_adds_to_matching_day_only() {
        let mut ledger = Ledger::default();
        ledger.append(entry("2024-01-01", "Egg", 70.0, 6.0, 0.0, 5.0));
        let before_same = day_totals(&ledger, date("2024-01-01"));
        let before_other = day_totals(&ledger, date("2024-01-02"));

        ledger.append(entry("2024-01-01", "Rice", 205.0, 4.3, 45.0, 0.4));
        let after_same = day_totals(&ledger, date("2024-01-01"));
        assert!((after_same.calories - (before_same.calories + 205.0)).abs() < 1e-9);
        assert!((after_same.protein_g - (before_same.protein_g + 4.3)).abs() < 1e-9);
        assert!((after_same.carbs_g - (before_same.carbs_g + 45.0)).abs() < 1e-9);
        assert!((after_same.fat_g - (before_same.fat_g + 0.4)).abs() < 1e-9);

        assert_eq!(day_totals(&ledger, date("2024-01-02")), before_other);
    }

    #[test]
    fn test_goal_progress_bounds() {
        assert_eq!(goal_progress(0.0, 2000.0), 0.0);
        assert!((goal_progress(500.0, 2000.0) - 0.25).abs() < 1e-9);
        assert_eq!(goal_progress(2000.0, 2000.0), 1.0);
        assert_eq!(goal_progress(3500.0, 2000.0), 1.0);
    }

    #[test]
    fn test_goal_progress_non_positive_goal() {
        assert_eq!(goal_progress(100.0, 0.0), 1.0);
        assert_eq!(goal_progress(0.0, -50.0), 1.0);
    }

    #[test]
    fn test_rollup_two_dates_ascending() {
        let mut ledger = Ledger::default();
        // Inserted out of date order on purpose
        ledger.append(entry("2024-01-02", "Banana", 105.0, 1.3, 27.0, 0.4));
        ledger.append(entry("2024-01-01", "Egg", 70.0, 6.0, 0.0, 5.0));

        let rollup = range_rollup(&ledger);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].date, date("2024-01-01"));
        assert_eq!(rollup[1].date, date("2024-01-02"));
    }

    #[test]
    fn test_rollup_rows_match_day_totals() {
        let mut ledger = Ledger::default();
        ledger.append(entry("2024-01-01", "Egg", 70.0, 6.0, 0.0, 5.0));
        ledger.append(entry("2024-01-01", "Rice", 205.0, 4.3, 45.0, 0.4));
        ledger.append(entry("2024-01-03", "Yogurt", 59.0, 10.0, 3.6, 0.4));

        let rollup = range_rollup(&ledger);
        assert_eq!(rollup.len(), 2);
        for row in &rollup {
            let totals = day_totals(&ledger, row.date);
            assert_eq!(row.calories, totals.calories);
            assert_eq!(row.protein_g, totals.protein_g);
            assert_eq!(row.carbs_g, totals.carbs_g);
            assert_eq!(row.fat_g, totals.fat_g);
        }
    }
}
