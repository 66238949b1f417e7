//! Plan command: yesterday's digest and today's schedule.
//!
//! Human output prints the two Markdown blocks separated by a blank line.
//! JSON output is either `{"yesterday_digest", "today_plan"}` or, when any
//! step fails, a lone `{"error"}` object.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use dp_core::RenderedPlan;
use serde::Serialize;

use crate::commands::util::{local_timezone_name, resolve_params};
use crate::{Config, DayArgs};

/// JSON shape of the plan command's output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PlanOutput {
    Plan(RenderedPlan),
    Error { error: String },
}

/// Loads the documents and renders the plan for the requested day.
pub fn build(config: &Config, day: &DayArgs) -> Result<RenderedPlan> {
    let params = resolve_params(day, config)?;
    let inputs = dp_store::load_inputs(&config.documents()).context("failed to load documents")?;

    tracing::debug!(timezone = %local_timezone_name(), "normalizing meetings to local time");
    let plan = dp_core::generate_plan(&inputs, &params, &Local);
    Ok(plan.render())
}

/// Runs the plan command.
pub fn run<W: Write>(writer: &mut W, config: &Config, day: &DayArgs, json: bool) -> Result<()> {
    let result = build(config, day);

    if !json {
        let plan = result?;
        writeln!(writer, "{}", plan.yesterday_digest)?;
        writeln!(writer)?;
        writeln!(writer, "{}", plan.today_plan)?;
        return Ok(());
    }

    let (output, failure) = match result {
        Ok(plan) => (PlanOutput::Plan(plan), None),
        Err(err) => (
            PlanOutput::Error {
                error: format!("{err:#}"),
            },
            Some(err),
        ),
    };
    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;

    failure.map_or(Ok(()), Err)
}
