//! Free-time computation for the working day.
//!
//! The working window starts as a single free interval and every meeting that
//! starts on the target date is subtracted from it in turn. Intervals are
//! half-open: a meeting ending exactly when an interval starts (or starting
//! when it ends) leaves that interval untouched.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use serde::Serialize;

use crate::model::Meeting;
use crate::params::PlanParams;

/// Timestamp layouts accepted without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// A half-open span `[start, end)` of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl FreeInterval {
    /// Creates an interval, `None` unless `start < end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Removes the busy span `[busy_start, busy_end)` from every free interval.
///
/// Output stays ordered and disjoint when the input is.
pub fn subtract(
    free: &[FreeInterval],
    busy_start: NaiveDateTime,
    busy_end: NaiveDateTime,
) -> Vec<FreeInterval> {
    let mut remaining = Vec::with_capacity(free.len() + 1);

    for interval in free {
        if busy_end <= interval.start || busy_start >= interval.end {
            remaining.push(*interval);
            continue;
        }

        if let Some(left) = FreeInterval::new(interval.start, busy_start) {
            remaining.push(left);
        }
        if let Some(right) = FreeInterval::new(busy_end, interval.end) {
            remaining.push(right);
        }
    }

    remaining
}

/// Parses a meeting timestamp into local wall-clock time.
///
/// Offset-carrying timestamps are converted into `tz` and the offset is then
/// dropped. Naive timestamps are taken as already local.
pub fn normalize_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).naive_local());
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive);
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.with_timezone(tz).naive_local())
}

/// Computes the free intervals of the target day's working window.
///
/// Meetings whose normalized start falls on another date are ignored, as are
/// meetings with unparseable or inverted timestamps.
pub fn free_intervals<Tz: TimeZone>(
    params: &PlanParams,
    meetings: &[Meeting],
    tz: &Tz,
) -> Vec<FreeInterval> {
    let mut free: Vec<FreeInterval> =
        FreeInterval::new(params.window_start(), params.window_end())
            .into_iter()
            .collect();

    for meeting in meetings {
        let (Some(start), Some(end)) = (
            normalize_timestamp(&meeting.start, tz),
            normalize_timestamp(&meeting.end, tz),
        ) else {
            tracing::warn!(
                meeting = %meeting.id,
                start = %meeting.start,
                end = %meeting.end,
                "skipping meeting with unparseable timestamp"
            );
            continue;
        };

        if start.date() != params.date {
            continue;
        }

        if end <= start {
            tracing::warn!(meeting = %meeting.id, %start, %end, "skipping meeting that ends before it starts");
            continue;
        }

        free = subtract(&free, start, end);
    }

    tracing::debug!(count = free.len(), "computed free intervals");
    free
}
