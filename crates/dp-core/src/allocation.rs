//! Greedy time allocation.
//!
//! Ranked tasks claim free time strictly in rank order. A cursor walks the
//! free intervals front to back; each task takes as much of the current
//! interval as it still needs, spilling into the following intervals until its
//! estimate is covered or the day runs out. There is no lookahead and no
//! backtracking, so a long high-ranked task can consume the whole day.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::interval::FreeInterval;
use crate::rank::ScoredTask;

/// One scheduled block of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub task_id: String,
    pub title: String,
    /// Why the task landed here, e.g. `priority high due 2025-02-01`.
    pub justification: String,
}

impl AllocationRow {
    fn new(start: NaiveDateTime, end: NaiveDateTime, scored: &ScoredTask) -> Self {
        Self {
            start,
            end,
            task_id: scored.task.id.clone(),
            title: scored.task.title.clone(),
            justification: format!(
                "priority {} due {}",
                scored.task.priority,
                scored.due.format("%Y-%m-%d")
            ),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Packs ranked tasks into the free intervals.
///
/// The intervals are copied; the caller's slice is left untouched.
/// Tasks that do not fit are silently left (partly) unscheduled.
pub fn allocate(free: &[FreeInterval], ranked: &[ScoredTask]) -> Vec<AllocationRow> {
    let mut slots = free.to_vec();
    let mut cursor = 0;
    let mut rows = Vec::new();

    for scored in ranked {
        let mut remaining = scored.task.estimate();

        while remaining > TimeDelta::zero() && cursor < slots.len() {
            let slot = &mut slots[cursor];
            if slot.is_empty() {
                cursor += 1;
                continue;
            }

            let block = slot.duration().min(remaining);
            let end = slot.start + block;
            rows.push(AllocationRow::new(slot.start, end, scored));

            slot.start = end;
            if slot.is_empty() {
                cursor += 1;
            }
            remaining -= block;
        }

        if remaining > TimeDelta::zero() {
            tracing::debug!(
                task = %scored.task.id,
                unscheduled_minutes = remaining.num_minutes(),
                "ran out of free time"
            );
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::model::{Priority, Status, Task};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 29)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn span(from: (u32, u32), to: (u32, u32)) -> FreeInterval {
        FreeInterval::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    fn scored(id: &str, hours: f64) -> ScoredTask {
        ScoredTask {
            task: Task {
                id: id.to_string(),
                title: format!("Task {id}"),
                priority: Priority::High,
                estimate_hours: hours,
                due_date: Some("2025-02-01".to_string()),
                status: Status::Pending,
                tags: vec![],
            },
            score: 297,
            due: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        }
    }

    fn blocks(rows: &[AllocationRow]) -> Vec<(&str, NaiveDateTime, NaiveDateTime)> {
        rows.iter()
            .map(|r| (r.task_id.as_str(), r.start, r.end))
            .collect()
    }

    #[test]
    fn task_fits_in_first_interval() {
        let free = [span((9, 0), (11, 0)), span((12, 0), (17, 0))];
        let rows = allocate(&free, &[scored("T1", 2.0)]);

        assert_eq!(blocks(&rows), vec![("T1", at(9, 0), at(11, 0))]);
        assert_eq!(rows[0].justification, "priority high due 2025-02-01");
        assert_eq!(rows[0].title, "Task T1");
    }

    #[test]
    fn task_splits_across_intervals() {
        let free = [span((9, 0), (10, 0)), span((12, 0), (17, 0))];
        let rows = allocate(&free, &[scored("T1", 2.5)]);

        assert_eq!(
            blocks(&rows),
            vec![
                ("T1", at(9, 0), at(10, 0)),
                ("T1", at(12, 0), at(13, 30)),
            ]
        );
    }

    #[test]
    fn following_task_starts_where_previous_stopped() {
        let free = [span((9, 0), (11, 0)), span((12, 0), (17, 0))];
        let rows = allocate(&free, &[scored("T1", 1.5), scored("T2", 1.0)]);

        assert_eq!(
            blocks(&rows),
            vec![
                ("T1", at(9, 0), at(10, 30)),
                ("T2", at(10, 30), at(11, 0)),
                ("T2", at(12, 0), at(12, 30)),
            ]
        );
    }

    #[test]
    fn oversized_task_stops_at_end_of_day() {
        let free = [span((9, 0), (11, 0)), span((12, 0), (13, 0))];
        let rows = allocate(&free, &[scored("big", 10.0), scored("small", 0.5)]);

        assert_eq!(
            blocks(&rows),
            vec![
                ("big", at(9, 0), at(11, 0)),
                ("big", at(12, 0), at(13, 0)),
            ]
        );
        let total: TimeDelta = rows.iter().map(AllocationRow::duration).sum();
        assert_eq!(total, TimeDelta::hours(3));
    }

    #[test]
    fn zero_estimate_gets_no_rows() {
        let free = [span((9, 0), (17, 0))];
        let rows = allocate(&free, &[scored("none", 0.0), scored("T1", 1.0)]);

        assert_eq!(blocks(&rows), vec![("T1", at(9, 0), at(10, 0))]);
    }

    #[test]
    fn fractional_estimates_stay_on_minute_boundaries() {
        let free = [span((9, 0), (17, 0))];
        // 0.3333h and 0.005h would otherwise leave seconds on every boundary.
        let rows = allocate(&free, &[scored("T1", 0.3333), scored("tiny", 0.005), scored("T2", 1.0)]);

        assert_eq!(
            blocks(&rows),
            vec![
                ("T1", at(9, 0), at(9, 20)),
                ("T2", at(9, 20), at(10, 20)),
            ]
        );
    }

    #[test]
    fn no_free_time_means_no_rows() {
        assert!(allocate(&[], &[scored("T1", 1.0)]).is_empty());
    }

    #[test]
    fn allocation_is_deterministic() {
        let free = [span((9, 0), (10, 15)), span((13, 0), (17, 0))];
        let ranked = [scored("T1", 1.75), scored("T2", 3.0), scored("T3", 2.0)];

        let first = allocate(&free, &ranked);
        let second = allocate(&free, &ranked);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
