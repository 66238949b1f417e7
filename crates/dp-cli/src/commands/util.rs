//! Shared utilities for CLI commands.

use chrono::{Local, TimeDelta};
use dp_core::{ParamError, PlanParams};

use crate::{Config, DayArgs};

/// Resolves the target day and working hours, CLI flags first, then configuration.
///
/// The date defaults to today's local date.
pub fn resolve_params(day: &DayArgs, config: &Config) -> Result<PlanParams, ParamError> {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    PlanParams::parse(
        day.date.as_deref().unwrap_or(&today),
        day.work_start.as_deref().unwrap_or(&config.work_start),
        day.work_end.as_deref().unwrap_or(&config.work_end),
    )
}

/// Name of the zone meeting timestamps are normalized into.
pub fn local_timezone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Formats a duration as "Xh Ym" if >= 1 hour, "Xm" otherwise.
/// Negative durations are treated as 0m.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveTime;

    #[test]
    fn test_resolve_params_prefers_flags() {
        let config = Config::default();
        let day = DayArgs {
            date: Some("2025-01-29".to_string()),
            work_start: Some("10:00".to_string()),
            work_end: None,
        };

        let params = resolve_params(&day, &config).unwrap();

        assert_eq!(params.date.to_string(), "2025-01-29");
        assert_eq!(params.work_start, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(params.work_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_params_defaults_to_today() {
        let params = resolve_params(&DayArgs::default(), &Config::default()).unwrap();
        assert_eq!(params.date, Local::now().date_naive());
    }

    #[test]
    fn test_resolve_params_rejects_bad_config_hours() {
        let config = Config {
            work_end: "late".to_string(),
            ..Config::default()
        };
        assert!(resolve_params(&DayArgs::default(), &config).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::minutes(150)), "2h 30m");
        assert_eq!(format_duration(TimeDelta::minutes(60)), "1h 0m");
        assert_eq!(format_duration(TimeDelta::minutes(45)), "45m");
        assert_eq!(format_duration(TimeDelta::seconds(59)), "0m");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "0m");
    }
}
