//! Urgency ranking of pending tasks.
//!
//! `score = weight(priority) * 100 - days_until_due`. Overdue tasks have a
//! negative day count and therefore gain score. A missing or unparseable due
//! date is treated as due on the target date.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Task;

/// A pending task with its derived ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    pub task: Task,
    pub score: i64,
    /// Due date used for scoring, after substitution.
    pub due: NaiveDate,
}

/// Scores one task relative to `today`, returning the score and effective due date.
pub fn score_task(task: &Task, today: NaiveDate) -> (i64, NaiveDate) {
    let due = task.due().unwrap_or_else(|| {
        tracing::debug!(
            task = %task.id,
            due_date = ?task.due_date,
            "no usable due date, treating as due today"
        );
        today
    });
    let days_until_due = (due - today).num_days();
    (task.priority.weight() * 100 - days_until_due, due)
}

/// Drops done tasks and orders the rest by score, highest first.
///
/// Equal scores keep their input order.
pub fn rank_tasks(tasks: &[Task], today: NaiveDate) -> Vec<ScoredTask> {
    let mut ranked: Vec<ScoredTask> = tasks
        .iter()
        .filter(|task| !task.is_done())
        .map(|task| {
            let (score, due) = score_task(task, today);
            ScoredTask {
                task: task.clone(),
                score,
                due,
            }
        })
        .collect();

    ranked.sort_by_key(|scored| Reverse(scored.score));
    ranked
}
