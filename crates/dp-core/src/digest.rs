//! Digest of the previous day's activity log.

use chrono::NaiveDate;

use crate::model::LogBook;

/// Maximum number of log entries shown in a digest.
pub const MAX_DIGEST_ENTRIES: usize = 5;

/// Maximum number of words kept from each entry description.
pub const MAX_DESCRIPTION_WORDS: usize = 20;

/// Line emitted when the day has no log entries.
pub const NO_ENTRIES: &str = "No log entries.";

/// Summarizes the entries logged on `day`, in source order.
pub fn summarize_logs(logs: &LogBook, day: NaiveDate) -> Vec<String> {
    let key = day.format("%Y-%m-%d").to_string();
    let entries = logs.get(&key).map(Vec::as_slice).unwrap_or_default();

    if entries.is_empty() {
        return vec![NO_ENTRIES.to_string()];
    }

    entries
        .iter()
        .take(MAX_DIGEST_ENTRIES)
        .map(|entry| {
            format!(
                "{}: {} ({}h)",
                entry.task_id,
                truncate_words(&entry.description, MAX_DESCRIPTION_WORDS),
                entry.actual_hours
            )
        })
        .collect()
}

/// Keeps the first `max_words` whitespace-separated words, joined by single spaces.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
