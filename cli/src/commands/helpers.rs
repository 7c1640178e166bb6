use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// Render goal progress as a fixed-width bar, e.g. `[#######-------] 52%`.
pub(crate) fn progress_bar(fraction: f64, width: usize) -> String {
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width - filled.min(width);
    let pct = (fraction.clamp(0.0, 1.0) * 100.0).round();
    format!("[{}{}] {pct:.0}%", "#".repeat(filled), "-".repeat(empty))
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
