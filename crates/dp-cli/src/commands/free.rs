//! Free command: the day's working time not taken by meetings.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Local, TimeDelta};
use dp_core::FreeInterval;
use serde::Serialize;

use crate::commands::util::{format_duration, resolve_params};
use crate::{Config, DayArgs};

#[derive(Debug, Serialize)]
pub struct FreeExport {
    pub start: String,
    pub end: String,
    pub minutes: i64,
}

impl From<&FreeInterval> for FreeExport {
    fn from(interval: &FreeInterval) -> Self {
        Self {
            start: interval.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end: interval.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            minutes: interval.duration().num_minutes(),
        }
    }
}

/// Formats free intervals for humans, one per line, with a total.
pub fn format_free(intervals: &[FreeInterval]) -> String {
    if intervals.is_empty() {
        return "No free time.\n".to_string();
    }

    let mut lines: Vec<String> = intervals
        .iter()
        .map(|interval| {
            format!(
                "{}-{}  {}",
                interval.start.format("%H:%M"),
                interval.end.format("%H:%M"),
                format_duration(interval.duration())
            )
        })
        .collect();
    let total: TimeDelta = intervals.iter().map(FreeInterval::duration).sum();
    lines.push(format!("Total: {}", format_duration(total)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Runs the free command.
pub fn run<W: Write>(writer: &mut W, config: &Config, day: &DayArgs, json: bool) -> Result<()> {
    let params = resolve_params(day, config)?;
    let meetings = dp_store::load_meetings(&config.meetings_path)
        .context("failed to load meetings")?;
    let intervals = dp_core::free_intervals(&params, &meetings, &Local);

    if json {
        let export: Vec<FreeExport> = intervals.iter().map(FreeExport::from).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&export)?)?;
    } else {
        write!(writer, "{}", format_free(&intervals))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, NaiveDateTime};
    use insta::assert_snapshot;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 29)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_format_free_lists_intervals_and_total() {
        let intervals = [
            FreeInterval::new(at(9, 0), at(11, 0)).unwrap(),
            FreeInterval::new(at(12, 0), at(12, 45)).unwrap(),
        ];

        assert_snapshot!(format_free(&intervals).trim_end(), @r"
        09:00-11:00  2h 0m
        12:00-12:45  45m
        Total: 2h 45m
        ");
    }

    #[test]
    fn test_format_free_empty_day() {
        assert_eq!(format_free(&[]), "No free time.\n");
    }

    #[test]
    fn test_run_json_lists_intervals() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            meetings_path: dir.path().join("meetings.json"),
            ..Config::default()
        };
        std::fs::write(
            &config.meetings_path,
            r#"[{"id": "M1", "start": "2025-01-29T11:00:00", "end": "2025-01-29T12:00:00"}]"#,
        )
        .unwrap();
        let day = DayArgs {
            date: Some("2025-01-29".to_string()),
            ..DayArgs::default()
        };

        let mut output = Vec::new();
        run(&mut output, &config, &day, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["start"], "2025-01-29T09:00:00");
        assert_eq!(value[0]["minutes"], 120);
        assert_eq!(value[1]["start"], "2025-01-29T12:00:00");
    }
}
