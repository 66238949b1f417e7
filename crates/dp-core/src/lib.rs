//! Core domain logic for the daily planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Free intervals: subtracting meetings from the working day
//! - Ranking: ordering pending tasks by priority and due-date urgency
//! - Allocation: greedily packing ranked tasks into free time
//! - Digest and rendering: turning yesterday's log and today's allocation into text

mod allocation;
mod digest;
pub mod interval;
pub mod model;
mod params;
mod plan;
mod rank;
pub mod render;

pub use allocation::{AllocationRow, allocate};
pub use digest::{MAX_DIGEST_ENTRIES, MAX_DESCRIPTION_WORDS, summarize_logs, truncate_words};
pub use interval::{FreeInterval, free_intervals, normalize_timestamp, subtract};
pub use model::{LogBook, LogEntry, Meeting, Priority, Status, Task};
pub use params::{ParamError, PlanParams, parse_date};
pub use plan::{Plan, PlanInputs, RenderedPlan, generate_plan};
pub use rank::{ScoredTask, rank_tasks, score_task};
