//! Init command for creating the source documents.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;

/// Runs the init command.
pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let docs = config.documents();
    let created = dp_store::bootstrap(&docs).context("failed to create documents")?;

    for ((label, path), created) in ["Tasks:", "Logs:", "Meetings:"]
        .into_iter()
        .zip([&docs.tasks, &docs.logs, &docs.meetings])
        .zip(created)
    {
        let state = if created { "created" } else { "exists" };
        writeln!(writer, "{label:<10}{} ({state})", path.display())?;
    }

    Ok(())
}
