//! Input records consumed by the planner.
//!
//! Records are read-only snapshots of documents owned by other tools. Field
//! decoding is deliberately forgiving: unknown priority labels fall back to
//! `low`, unknown statuses count as pending, and missing optional fields take
//! their empty defaults so one sloppy record never blocks a whole plan.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// String representation used in documents and rendered plans.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Ranking weight: high is 3, medium is 2, low is 1.
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Parses a label, treating anything unrecognized as `low`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|err: UnknownPriority| {
            tracing::debug!(%err, "falling back to low priority");
            Self::Low
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(lenient_text(deserializer)?.map_or(Self::Low, |label| Self::from_label(&label)))
    }
}

/// Error type for unknown priority strings.
#[derive(Debug, Clone)]
pub struct UnknownPriority(String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority: {}", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

/// Task status. Only `done` excludes a task from planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Pending,
    Done,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }

    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("done") {
            Self::Done
        } else {
            Self::Pending
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(lenient_text(deserializer)?.map_or(Self::Pending, |label| Self::from_label(&label)))
    }
}

/// A unit of work tracked elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "scalar_text")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub priority: Priority,

    /// Estimated effort in hours.
    #[serde(default)]
    pub estimate_hours: f64,

    /// Raw due date as written in the source document (ISO date expected).
    #[serde(
        default,
        deserialize_with = "optional_scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    /// Parsed due date, `None` when missing or not an ISO date.
    pub fn due(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Estimated effort, rounded to the minute. Negative or non-finite estimates are zero.
    pub fn estimate(&self) -> TimeDelta {
        if !self.estimate_hours.is_finite() || self.estimate_hours <= 0.0 {
            return TimeDelta::zero();
        }
        #[allow(clippy::cast_possible_truncation)]
        let minutes = (self.estimate_hours * 60.0).round() as i64;
        TimeDelta::try_minutes(minutes).unwrap_or(TimeDelta::MAX)
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }
}

/// One entry of a day's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, deserialize_with = "scalar_text")]
    pub task_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub actual_hours: f64,
}

/// Activity log keyed by ISO date (`YYYY-MM-DD`), entries in source order.
pub type LogBook = BTreeMap<String, Vec<LogEntry>>;

/// A fixed-time meeting.
///
/// `start` and `end` stay raw until interval computation so that a single
/// unparseable timestamp only drops that meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default, deserialize_with = "scalar_text")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "timestamp_text")]
    pub start: String,

    #[serde(default, deserialize_with = "timestamp_text")]
    pub end: String,

    #[serde(default)]
    pub participants: Vec<String>,
}

/// Scalars that documents commonly write either quoted or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// Any value: scalars keep their text, everything else is discarded.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Scalar(Scalar),
    Other(IgnoredAny),
}

/// Text of a scalar field, `None` for null, sequences and mappings.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Scalar(scalar)) => Some(scalar.into()),
        Some(Lenient::Other(IgnoredAny)) | None => None,
    })
}

/// Meeting timestamps left empty when absent or not a scalar, so interval
/// computation skips the meeting instead of the whole document failing.
fn timestamp_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn optional_scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}
