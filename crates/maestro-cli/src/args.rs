use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::PlanCommands;

/// Main command-line interface for the Maestro supervisor plan tool
///
/// Maestro tracks the task plan a supervisor delegates to specialist worker
/// roles: it stores plan producer output, marks tasks as completed, reports
/// plan status and gates whether a role's next task may start. It can run as
/// a one-shot CLI or as an MCP (Model Context Protocol) server for
/// integration with AI supervisors.
#[derive(Parser)]
#[command(version, about, name = "maestro")]
pub struct Args {
    /// Path to the SQLite session state file. Defaults to
    /// $XDG_DATA_HOME/maestro/state.db
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Maestro CLI
///
/// The CLI is organized into two main command categories:
/// - `plan`: Operations on the supervisor plan (store, status, mark, ...)
/// - `serve`: Start the MCP server for AI supervisor integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage the supervisor plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Start the MCP server
    Serve,
}
