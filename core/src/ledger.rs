use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::{Entry, NewEntry};

/// Durable file schema, in column order.
const COLUMNS: [&str; 6] = ["Date", "Name", "Calories", "Protein", "Carbs", "Fat"];

/// The full ordered collection of entries across all dates.
///
/// Insertion order is preserved but carries no meaning; display sorting is
/// a view concern. Mutations here are pure — the [`LedgerStore`] is what
/// keeps the durable file in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Ledger {
    #[must_use]
    pub fn from_rows(rows: Vec<NewEntry>) -> Self {
        let entries: Vec<Entry> = rows
            .into_iter()
            .zip(1u64..)
            .map(|(row, id)| Entry {
                id,
                date: row.date,
                name: row.name,
                calories: row.calories,
                protein_g: row.protein_g,
                carbs_g: row.carbs_g,
                fat_g: row.fat_g,
            })
            .collect();
        let next_id = entries.len() as u64 + 1;
        Self { entries, next_id }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for a single calendar date, in insertion order.
    pub fn entries_for(&self, date: NaiveDate) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Absolute position of an entry in the full ledger.
    #[must_use]
    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Appends at the end and assigns the next id. No deduplication, no
    /// range validation.
    pub fn append(&mut self, new: NewEntry) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            date: new.date,
            name: new.name,
            calories: new.calories,
            protein_g: new.protein_g,
            carbs_g: new.carbs_g,
            fat_g: new.fat_g,
        });
        id
    }

    /// Removes the entry at `position` in the full ledger (not a filtered
    /// view). The ledger is unchanged on failure.
    pub fn remove_at(&mut self, position: usize) -> Result<Entry, LedgerError> {
        if position >= self.entries.len() {
            return Err(LedgerError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    /// Removes the entry with the given id. Ids are stable across other
    /// removals, so this is the delete handle exposed to users.
    pub fn remove(&mut self, id: u64) -> Result<Entry, LedgerError> {
        let position = self
            .position_of(id)
            .ok_or(LedgerError::UnknownEntry { id })?;
        self.remove_at(position)
    }

    /// Puts a removed entry back where it was (persist-failure rollback).
    pub(crate) fn insert_at(&mut self, position: usize, entry: Entry) {
        self.entries.insert(position, entry);
    }

    /// Drops the most recently appended entry, reclaiming its id
    /// (persist-failure rollback).
    pub(crate) fn rollback_append(&mut self) {
        if self.entries.pop().is_some() {
            self.next_id -= 1;
        }
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.next_id = 1;
    }
}

/// Flat-file store for the ledger.
///
/// Every mutating call rewrites the whole file synchronously, so the
/// durable copy always matches the in-memory one when a call returns.
/// O(n) per mutation, which is fine at diary scale.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the durable file into a ledger. A missing file is an empty
    /// ledger; a malformed one is a `CorruptStore` error rather than a
    /// silent empty result.
    pub fn load(&self) -> Result<Ledger, LedgerError> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Ledger::default()),
            Err(e) => {
                return Err(LedgerError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = rdr
            .headers()
            .map_err(|e| self.corrupt(format!("unreadable header: {e}")))?
            .clone();
        let col = |name: &str| -> Result<usize, LedgerError> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| self.corrupt(format!("missing column '{name}'")))
        };
        let idx: Vec<usize> = COLUMNS
            .iter()
            .map(|name| col(name))
            .collect::<Result<_, _>>()?;

        let mut rows = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.corrupt(format!("row {}: {e}", line + 2)))?;
            let field = |i: usize| record.get(idx[i]).unwrap_or("");

            let date = parse_date(field(0))
                .ok_or_else(|| self.corrupt(format!("row {}: bad date '{}'", line + 2, field(0))))?;
            let number = |i: usize| -> Result<f64, LedgerError> {
                field(i).parse::<f64>().map_err(|_| {
                    self.corrupt(format!(
                        "row {}: bad number '{}' in {}",
                        line + 2,
                        field(i),
                        COLUMNS[i]
                    ))
                })
            };

            rows.push(NewEntry {
                date,
                name: field(1).to_string(),
                calories: number(2)?,
                protein_g: number(3)?,
                carbs_g: number(4)?,
                fat_g: number(5)?,
            });
        }

        Ok(Ledger::from_rows(rows))
    }

    /// Overwrites the durable file with the full ledger contents, one row
    /// per entry, dates as `YYYY-MM-DD`.
    pub fn persist(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let file = fs::File::create(&self.path).map_err(|e| LedgerError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let mut wtr = csv::Writer::from_writer(file);

        wtr.write_record(COLUMNS)
            .map_err(|e| self.write_failed(&e))?;
        for entry in ledger.entries() {
            wtr.write_record([
                entry.date.format("%Y-%m-%d").to_string(),
                entry.name.clone(),
                entry.calories.to_string(),
                entry.protein_g.to_string(),
                entry.carbs_g.to_string(),
                entry.fat_g.to_string(),
            ])
            .map_err(|e| self.write_failed(&e))?;
        }
        wtr.flush().map_err(|e| LedgerError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Appends and immediately persists, returning the new entry's id.
    /// The append is rolled back if the write fails, keeping memory and
    /// file in sync.
    pub fn append(&self, ledger: &mut Ledger, new: NewEntry) -> Result<u64, LedgerError> {
        let id = ledger.append(new);
        if let Err(e) = self.persist(ledger) {
            ledger.rollback_append();
            return Err(e);
        }
        Ok(id)
    }

    /// Removes by id and immediately persists. The entry is restored if
    /// the write fails, so the ledger and the file are unchanged on any
    /// failure.
    pub fn remove(&self, ledger: &mut Ledger, id: u64) -> Result<Entry, LedgerError> {
        let position = ledger
            .position_of(id)
            .ok_or(LedgerError::UnknownEntry { id })?;
        self.remove_at(ledger, position)
    }

    /// Removes by absolute position and immediately persists, restoring
    /// the entry if the write fails.
    pub fn remove_at(&self, ledger: &mut Ledger, position: usize) -> Result<Entry, LedgerError> {
        let removed = ledger.remove_at(position)?;
        if let Err(e) = self.persist(ledger) {
            ledger.insert_at(position, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Deletes the durable file and resets the in-memory ledger to empty.
    pub fn clear(&self, ledger: &mut Ledger) -> Result<(), LedgerError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(LedgerError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        }
        ledger.reset();
        Ok(())
    }

    fn corrupt(&self, detail: String) -> LedgerError {
        LedgerError::CorruptStore {
            path: self.path.clone(),
            detail,
        }
    }

    fn write_failed(&self, e: &csv::Error) -> LedgerError {
        LedgerError::CorruptStore {
            path: self.path.clone(),
            detail: format!("write failed: {e}"),
        }
    }
}

/// Parse a stored date, discarding any time-of-day or zone component.
///
/// `YYYY-MM-DD` is canonical; older exports sometimes carry a full
/// timestamp or a slash format, so fall back through those.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    None
}
