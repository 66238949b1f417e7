//! CLI subcommand implementations.

pub mod free;
pub mod init;
pub mod plan;
pub mod rank;
pub mod util;
