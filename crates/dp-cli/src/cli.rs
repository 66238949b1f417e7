//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Daily planner.
///
/// Packs pending tasks into the free time left between today's meetings and
/// summarizes what was logged yesterday.
#[derive(Debug, Parser)]
#[command(name = "dp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the plan for a day.
    Plan {
        #[command(flatten)]
        day: DayArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the free working time left between meetings.
    Free {
        #[command(flatten)]
        day: DayArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show pending tasks in scheduling order.
    Rank {
        /// Target date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create missing task, log and meeting documents.
    Init,
}

/// Target day and working hours, overriding configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct DayArgs {
    /// Target date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Start of working hours (HH:MM).
    #[arg(long)]
    pub work_start: Option<String>,

    /// End of working hours (HH:MM).
    #[arg(long)]
    pub work_end: Option<String>,
}
