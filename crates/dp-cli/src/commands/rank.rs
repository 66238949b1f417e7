//! Rank command: pending tasks in the order they would be scheduled.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use dp_core::ScoredTask;
use serde::Serialize;

use crate::Config;

#[derive(Debug, Serialize)]
pub struct RankExport {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub due: String,
    pub estimate_hours: f64,
    pub score: i64,
}

impl From<&ScoredTask> for RankExport {
    fn from(scored: &ScoredTask) -> Self {
        Self {
            id: scored.task.id.clone(),
            title: scored.task.title.clone(),
            priority: scored.task.priority.to_string(),
            due: scored.due.format("%Y-%m-%d").to_string(),
            estimate_hours: scored.task.estimate_hours,
            score: scored.score,
        }
    }
}

/// Formats ranked tasks as aligned text rows.
pub fn format_ranked(ranked: &[ScoredTask]) -> String {
    if ranked.is_empty() {
        return "No pending tasks.\n".to_string();
    }

    let mut out = String::new();
    for scored in ranked {
        out.push_str(&format!(
            "{:>5}  {:<8} {:<6} due {}  {}\n",
            scored.score,
            scored.task.id,
            scored.task.priority.as_str(),
            scored.due.format("%Y-%m-%d"),
            scored.task.title
        ));
    }
    out
}

/// Runs the rank command. Only the date is read; working hours play no part.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = match date {
        Some(date) => dp_core::parse_date(date)?,
        None => Local::now().date_naive(),
    };
    let tasks = dp_store::load_tasks(&config.tasks_path).context("failed to load tasks")?;
    let ranked = dp_core::rank_tasks(&tasks, today);

    if json {
        let export: Vec<RankExport> = ranked.iter().map(RankExport::from).collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&export)?)?;
    } else {
        write!(writer, "{}", format_ranked(&ranked))?;
    }

    Ok(())
}
