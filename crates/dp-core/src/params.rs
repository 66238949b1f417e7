//! Invocation parameters: target date and working hours.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use thiserror::Error;

/// Invalid invocation parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A parameter string could not be parsed.
    #[error("invalid {name}: {value:?} ({expected})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Validated parameters for one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanParams {
    pub date: NaiveDate,
    pub work_start: NaiveTime,
    pub work_end: NaiveTime,
}

impl PlanParams {
    /// Builds parameters from already-typed values, checking the working window.
    pub fn new(
        date: NaiveDate,
        work_start: NaiveTime,
        work_end: NaiveTime,
    ) -> Result<Self, ParamError> {
        if work_end <= work_start {
            return Err(ParamError::InvalidParameter {
                name: "work_end",
                value: work_end.format("%H:%M").to_string(),
                expected: "a time after work_start",
            });
        }
        Ok(Self {
            date,
            work_start,
            work_end,
        })
    }

    /// Parses an ISO date and two `HH:MM` working-hour bounds.
    pub fn parse(date: &str, work_start: &str, work_end: &str) -> Result<Self, ParamError> {
        Self::new(
            parse_date(date)?,
            parse_clock("work_start", work_start)?,
            parse_clock("work_end", work_end)?,
        )
    }

    /// The day whose log feeds the digest.
    pub fn yesterday(&self) -> NaiveDate {
        self.date - TimeDelta::days(1)
    }

    pub fn window_start(&self) -> NaiveDateTime {
        self.date.and_time(self.work_start)
    }

    pub fn window_end(&self) -> NaiveDateTime {
        self.date.and_time(self.work_end)
    }
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate, ParamError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ParamError::InvalidParameter {
            name: "date",
            value: value.to_string(),
            expected: "YYYY-MM-DD",
        }
    })
}

/// Parses a local wall-clock time, `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(name: &'static str, value: &str) -> Result<NaiveTime, ParamError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ParamError::InvalidParameter {
            name,
            value: value.to_string(),
            expected: "HH:MM",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_parameters() {
        let params = PlanParams::parse("2025-01-29", "09:00", "17:30").unwrap();

        assert_eq!(params.date, NaiveDate::from_ymd_opt(2025, 1, 29).unwrap());
        assert_eq!(params.work_start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(params.work_end, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
        assert_eq!(params.yesterday(), NaiveDate::from_ymd_opt(2025, 1, 28).unwrap());
    }

    #[test]
    fn accepts_seconds_in_work_hours() {
        let params = PlanParams::parse("2025-01-29", "08:15:00", "12:00:30").unwrap();
        assert_eq!(params.work_end, NaiveTime::from_hms_opt(12, 0, 30).unwrap());
    }

    #[test]
    fn yesterday_crosses_month_boundary() {
        let params = PlanParams::parse("2025-03-01", "09:00", "17:00").unwrap();
        assert_eq!(params.yesterday(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn rejects_bad_date() {
        let err = PlanParams::parse("29/01/2025", "09:00", "17:00").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid date: "29/01/2025" (YYYY-MM-DD)"#
        );
    }

    #[test]
    fn rejects_bad_clock() {
        let err = PlanParams::parse("2025-01-29", "9am", "17:00").unwrap_err();
        assert!(matches!(
            err,
            ParamError::InvalidParameter {
                name: "work_start",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = PlanParams::parse("2025-01-29", "17:00", "09:00").unwrap_err();
        assert!(matches!(
            err,
            ParamError::InvalidParameter {
                name: "work_end",
                ..
            }
        ));
    }
}
