//! Markdown rendering of a plan.
//!
//! The two blocks are independent: the digest never refers to the table and
//! the table keeps allocation order verbatim.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::allocation::AllocationRow;

const TABLE_HEADER: &str = "| Time | Task | Notes |";
const TABLE_RULE: &str = "|------|------|-------|";

/// Renders the digest of `day`'s log as a headed bullet list.
pub fn render_digest(day: NaiveDate, lines: &[String]) -> String {
    let mut out = vec![format!("## Yesterday ({})", day.format("%Y-%m-%d"))];
    out.extend(lines.iter().map(|line| format!("- {line}")));
    out.join("\n")
}

/// Renders the allocation for `date` as a Markdown table.
///
/// With no rows only the header is emitted.
pub fn render_table(date: NaiveDate, rows: &[AllocationRow]) -> String {
    let mut out = vec![
        format!("## Today ({})", date.format("%Y-%m-%d")),
        TABLE_HEADER.to_string(),
        TABLE_RULE.to_string(),
    ];
    out.extend(rows.iter().map(|row| {
        format!(
            "| {}-{} | {} {} | {} |",
            clock(row.start),
            clock(row.end),
            escape_cell(&row.task_id),
            escape_cell(&row.title),
            escape_cell(&row.justification),
        )
    }));
    out.join("\n")
}

/// `HH:MM`, widened to `HH:MM:SS` when a meeting boundary is off the minute.
fn clock(at: NaiveDateTime) -> String {
    if at.second() == 0 {
        at.format("%H:%M").to_string()
    } else {
        at.format("%H:%M:%S").to_string()
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
