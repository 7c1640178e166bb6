use anyhow::{Result, bail};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use diario_core::{Ledger, LedgerStore, NewEntry};

use super::helpers::parse_date;
use crate::staging;

/// Log a fully-specified entry directly (the manual form path).
#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_log(
    store: &LedgerStore,
    ledger: &mut Ledger,
    name: &str,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Entry name must not be empty");
    }
    let date = parse_date(date)?;

    let id = store.append(
        ledger,
        NewEntry {
            date,
            name: name.to_string(),
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
        },
    )?;

    let entry = ledger.get(id).expect("entry was just appended");
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        let cal = entry.calories;
        println!("Logged: {name} for {date} — {cal:.0} kcal (id: {id})");
    }

    Ok(())
}

/// Commit the staged import as a durable entry and clear the slot.
pub(crate) fn cmd_save(
    store: &LedgerStore,
    ledger: &mut Ledger,
    staged_path: &Path,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;

    let mut slot = staging::load_slot(staged_path)?;
    let Some(staged) = slot.take() else {
        eprintln!("Nothing staged. Use 'diario quick' or 'diario search --import' first.");
        process::exit(2);
    };
    if staged.name.trim().is_empty() {
        bail!("Staged entry has no name; stage it again");
    }

    let id = store.append(
        ledger,
        NewEntry {
            date,
            name: staged.name.clone(),
            calories: staged.calories,
            protein_g: staged.protein_g,
            carbs_g: staged.carbs_g,
            fat_g: staged.fat_g,
        },
    )?;
    // Only a successful save consumes the slot
    staging::store_slot(staged_path, &slot)?;

    let entry = ledger.get(id).expect("entry was just appended");
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        let name = &entry.name;
        let cal = entry.calories;
        println!("Logged for {date}: {name} — {cal:.0} kcal (id: {id})");
    }

    Ok(())
}

/// Delete an entry by its id (shown in summary/history output).
pub(crate) fn cmd_delete(
    store: &LedgerStore,
    ledger: &mut Ledger,
    id: u64,
    json: bool,
) -> Result<()> {
    let removed = store.remove(ledger, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&removed)?);
    } else {
        let name = &removed.name;
        let date = removed.date;
        let cal = removed.calories;
        println!("Deleted: {name} ({cal:.0} kcal) from {date}");
    }

    Ok(())
}

/// Wipe the diary: empty the ledger and remove the durable file.
pub(crate) fn cmd_clear(store: &LedgerStore, ledger: &mut Ledger, yes: bool) -> Result<()> {
    if !yes {
        let count = ledger.len();
        eprint!("This deletes all {count} logged entries. Type 'yes' to confirm: ");
        io::stderr().flush()?;
        let stdin = io::stdin();
        let line = stdin.lock().lines().next().transpose()?.unwrap_or_default();
        if line.trim() != "yes" {
            eprintln!("Aborted.");
            process::exit(2);
        }
    }

    store.clear(ledger)?;
    println!("All entries cleared.");
    Ok(())
}
