use chrono::NaiveDate;
use serde::Serialize;

/// One logged food event.
///
/// The `id` is a session-scoped monotonic counter assigned by the store
/// (file order on load, incrementing on append). It is the delete handle
/// and never shifts when other entries are removed; it is not written to
/// the durable file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: u64,
    pub date: NaiveDate,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// An entry as submitted for logging, before the store assigns an id.
///
/// No range validation: negative macros are accepted (parity with the
/// behavior being replaced); only the name is required to be non-empty,
/// which the CLI enforces at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Summed macros for one day. Zero for a day with no entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTotals {
    pub(crate) fn add_entry(&mut self, entry: &Entry) {
        self.calories += entry.calories;
        self.protein_g += entry.protein_g;
        self.carbs_g += entry.carbs_g;
        self.fat_g += entry.fat_g;
    }
}

/// Per-date macro rollup row, produced in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRollup {
    pub date: NaiveDate,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}
