//! Daily planner CLI library.
//!
//! This crate provides the CLI interface for the daily planner.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DayArgs};
pub use config::Config;
