//! Plan generation: digest, free time, ranking and allocation in one pass.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::allocation::{AllocationRow, allocate};
use crate::digest::summarize_logs;
use crate::interval::{FreeInterval, free_intervals};
use crate::model::{LogBook, Meeting, Task};
use crate::params::PlanParams;
use crate::rank::{ScoredTask, rank_tasks};
use crate::render::{render_digest, render_table};

/// Snapshot of the three source collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanInputs {
    pub tasks: Vec<Task>,
    pub logs: LogBook,
    pub meetings: Vec<Meeting>,
}

/// Result of one planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub date: NaiveDate,
    pub yesterday: NaiveDate,
    pub digest: Vec<String>,
    pub free: Vec<FreeInterval>,
    pub ranked: Vec<ScoredTask>,
    pub rows: Vec<AllocationRow>,
}

/// The two text blocks handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPlan {
    pub yesterday_digest: String,
    pub today_plan: String,
}

impl Plan {
    pub fn render(&self) -> RenderedPlan {
        RenderedPlan {
            yesterday_digest: render_digest(self.yesterday, &self.digest),
            today_plan: render_table(self.date, &self.rows),
        }
    }
}

/// Builds the plan for `params.date`.
///
/// `tz` is the zone offset-carrying meeting timestamps are converted into.
pub fn generate_plan<Tz: TimeZone>(inputs: &PlanInputs, params: &PlanParams, tz: &Tz) -> Plan {
    let yesterday = params.yesterday();
    let digest = summarize_logs(&inputs.logs, yesterday);
    let free = free_intervals(params, &inputs.meetings, tz);
    let ranked = rank_tasks(&inputs.tasks, params.date);
    let rows = allocate(&free, &ranked);

    tracing::debug!(
        date = %params.date,
        free_intervals = free.len(),
        ranked = ranked.len(),
        rows = rows.len(),
        "generated plan"
    );

    Plan {
        date: params.date,
        yesterday,
        digest,
        free,
        ranked,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use insta::assert_snapshot;

    use crate::model::{LogEntry, Priority, Status};

    fn params() -> PlanParams {
        PlanParams::parse("2025-01-29", "09:00", "17:00").unwrap()
    }

    fn task(id: &str, priority: Priority, hours: f64, due: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            priority,
            estimate_hours: hours,
            due_date: Some(due.to_string()),
            status: Status::Pending,
            tags: vec![],
        }
    }

    fn standup() -> Meeting {
        Meeting {
            id: "M1".to_string(),
            title: "Standup".to_string(),
            start: "2025-01-29T11:00:00".to_string(),
            end: "2025-01-29T12:00:00".to_string(),
            participants: vec!["ana".to_string(), "li".to_string()],
        }
    }

    #[test]
    fn empty_inputs_give_empty_table() {
        let plan = generate_plan(&PlanInputs::default(), &params(), &Utc);

        assert!(plan.rows.is_empty());
        assert_eq!(plan.free.len(), 1);

        let rendered = plan.render();
        assert_snapshot!(rendered.yesterday_digest, @r"
        ## Yesterday (2025-01-28)
        - No log entries.
        ");
        assert_snapshot!(rendered.today_plan, @r"
        ## Today (2025-01-29)
        | Time | Task | Notes |
        |------|------|-------|
        ");
    }

    #[test]
    fn single_task_fills_morning_before_meeting() {
        let inputs = PlanInputs {
            tasks: vec![task("T1", Priority::High, 2.0, "2025-02-01")],
            logs: LogBook::new(),
            meetings: vec![standup()],
        };

        let plan = generate_plan(&inputs, &params(), &Utc);

        assert_eq!(plan.rows.len(), 1);
        assert_eq!(plan.rows[0].start.format("%H:%M").to_string(), "09:00");
        assert_eq!(plan.rows[0].end.format("%H:%M").to_string(), "11:00");
        assert!(
            plan.rows
                .iter()
                .all(|r| r.end <= plan.free[0].end || r.start >= plan.free[1].start)
        );
    }

    #[test]
    fn full_plan_rendering() {
        let mut logs = LogBook::new();
        logs.insert(
            "2025-01-28".to_string(),
            vec![LogEntry {
                task_id: "T2".to_string(),
                description: "Outlined the quarterly report sections".to_string(),
                actual_hours: 1.5,
            }],
        );
        let mut finished = task("T0", Priority::High, 3.0, "2025-01-20");
        finished.status = Status::Done;

        let inputs = PlanInputs {
            tasks: vec![
                task("T1", Priority::Medium, 1.5, "2025-01-30"),
                task("T2", Priority::High, 2.5, "2025-02-03"),
                finished,
                task("T3", Priority::Low, 4.0, "2025-01-27"),
            ],
            logs,
            meetings: vec![standup()],
        };

        let rendered = generate_plan(&inputs, &params(), &Utc).render();

        assert_snapshot!(rendered.yesterday_digest, @r"
        ## Yesterday (2025-01-28)
        - T2: Outlined the quarterly report sections (1.5h)
        ");
        assert_snapshot!(rendered.today_plan, @r"
        ## Today (2025-01-29)
        | Time | Task | Notes |
        |------|------|-------|
        | 09:00-11:00 | T2 Task T2 | priority high due 2025-02-03 |
        | 12:00-12:30 | T2 Task T2 | priority high due 2025-02-03 |
        | 12:30-14:00 | T1 Task T1 | priority medium due 2025-01-30 |
        | 14:00-17:00 | T3 Task T3 | priority low due 2025-01-27 |
        ");
    }
}
