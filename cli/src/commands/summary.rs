use anyhow::Result;
use serde::Serialize;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use diario_core::aggregate::{day_totals, goal_progress, range_rollup};
use diario_core::{Entry, Ledger, MacroTotals};

use super::helpers::{parse_date, progress_bar, truncate};

const BAR_WIDTH: usize = 24;

#[derive(Serialize)]
struct DaySummary<'a> {
    date: String,
    goal: f64,
    progress: f64,
    totals: MacroTotals,
    entries: Vec<&'a Entry>,
}

/// Day view: totals, goal progress, and the day's entries with their ids.
pub(crate) fn cmd_summary(
    ledger: &Ledger,
    date: Option<String>,
    goal: f64,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;
    let totals = day_totals(ledger, date);
    let progress = goal_progress(totals.calories, goal);
    let entries: Vec<&Entry> = ledger.entries_for(date).collect();

    if json {
        let summary = DaySummary {
            date: date.to_string(),
            goal,
            progress,
            totals,
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== {date} ===\n");
    let cal = totals.calories;
    println!("  {} {cal:.0} / {goal:.0} kcal", progress_bar(progress, BAR_WIDTH));
    let p = totals.protein_g;
    let c = totals.carbs_g;
    let f = totals.fat_g;
    println!("  P:{p:.0}g C:{c:.0}g F:{f:.0}g\n");

    if entries.is_empty() {
        println!("  Nothing logged for this day yet.");
    } else {
        for e in &entries {
            let id = e.id;
            let name = &e.name;
            let ecal = e.calories;
            let ep = e.protein_g;
            let ec = e.carbs_g;
            let ef = e.fat_g;
            println!("  [{id}] {name} — {ecal:.0} kcal | P:{ep:.0}g C:{ec:.0}g F:{ef:.0}g");
        }
    }

    Ok(())
}

/// History view: per-date rollup (ascending) plus the full log, newest
/// date first.
pub(crate) fn cmd_history(ledger: &Ledger, json: bool) -> Result<()> {
    let rollup = range_rollup(ledger);

    if json {
        println!("{}", serde_json::to_string_pretty(&rollup)?);
        return Ok(());
    }

    if rollup.is_empty() {
        eprintln!("No entries logged yet");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct RollupRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fat")]
        fat: String,
    }

    let rows: Vec<RollupRow> = rollup
        .iter()
        .map(|r| RollupRow {
            date: r.date.to_string(),
            calories: format!("{:.0}", r.calories),
            protein: format!("{:.0}g", r.protein_g),
            carbs: format!("{:.0}g", r.carbs_g),
            fat: format!("{:.0}g", r.fat_g),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("Daily macros\n{table}\n");

    #[derive(Tabled)]
    struct LogRow {
        #[tabled(rename = "ID")]
        id: u64,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fat")]
        fat: String,
    }

    // Tabular view re-sorts newest-first; the rollup above stays ascending
    let mut entries: Vec<&Entry> = ledger.entries().iter().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let log_rows: Vec<LogRow> = entries
        .iter()
        .map(|e| LogRow {
            id: e.id,
            date: e.date.to_string(),
            name: truncate(&e.name, 35),
            calories: format!("{:.0}", e.calories),
            protein: format!("{:.1}g", e.protein_g),
            carbs: format!("{:.1}g", e.carbs_g),
            fat: format!("{:.1}g", e.fat_g),
        })
        .collect();

    let table = Table::new(&log_rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();
    println!("Full log\n{table}");

    Ok(())
}
