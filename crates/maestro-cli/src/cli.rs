//! Command-line interface definitions using clap
//!
//! This module defines the plan subcommands using clap's derive API and
//! implements the parameter wrapper pattern: CLI argument structs stay free
//! of core concerns and convert explicitly into `maestro_core::params`
//! types before reaching the tool adapter.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tool Adapter
//! ```
//!
//! Every command goes through the same adapter functions the MCP server
//! uses, so CLI and MCP observe identical payloads; the CLI then narrates
//! the payload (or renders the markdown, for `status`) to the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use maestro_core::{
    format_tool_status, handlers,
    params::{EnsureReady, MarkTask, StorePlan},
    RoleTaxonomy, SqliteStore,
};
use serde_json::Value;

use crate::renderer::TerminalRenderer;

/// Operations on the supervisor plan
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Store a new plan from plan producer output
    Store(StorePlanArgs),
    /// Show the current plan status
    Status,
    /// Mark a task as completed by its execution order
    Mark(MarkTaskArgs),
    /// Check whether a role's next task may start
    Ready(EnsureReadyArgs),
    /// Clear the stored plan and its raw text
    Reset,
}

/// Store a new plan
#[derive(Args)]
pub struct StorePlanArgs {
    /// Producer output: a JSON task list, possibly wrapped in narrative text
    pub plan: Option<String>,

    /// Read the producer output from a file instead of the command line
    #[arg(short, long, conflicts_with = "plan")]
    pub file: Option<PathBuf>,
}

impl StorePlanArgs {
    pub fn into_params(self) -> Result<StorePlan> {
        let plan = match (self.plan, self.file) {
            (Some(plan), None) => plan,
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read plan from {}", path.display()))?,
            _ => anyhow::bail!("Provide the plan text inline or via --file"),
        };
        Ok(StorePlan { plan })
    }
}

/// Mark a task as completed
#[derive(Args)]
pub struct MarkTaskArgs {
    /// Execution order of the task to complete
    pub execution_order: String,
}

impl MarkTaskArgs {
    pub fn into_params(self) -> MarkTask {
        MarkTask {
            execution_order: self.execution_order,
        }
    }
}

/// Check readiness of a role's next task
#[derive(Args)]
pub struct EnsureReadyArgs {
    /// Role name whose next task should be checked
    pub agent_name: String,

    /// Role treated as an upstream data provider (repeatable). Defaults to
    /// data_collector_agent
    #[arg(long = "upstream-role", value_name = "ROLE")]
    pub upstream_roles: Vec<String>,
}

impl EnsureReadyArgs {
    pub fn into_parts(self) -> (EnsureReady, RoleTaxonomy) {
        let taxonomy = if self.upstream_roles.is_empty() {
            RoleTaxonomy::default()
        } else {
            RoleTaxonomy::new(self.upstream_roles)
        };
        (
            EnsureReady {
                agent_name: self.agent_name,
            },
            taxonomy,
        )
    }
}

/// CLI command dispatcher over an open session store.
pub struct Cli {
    store: SqliteStore,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Creates a dispatcher over the given store and renderer.
    pub fn new(store: SqliteStore, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    /// Handles a plan subcommand.
    pub fn handle_plan_command(mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Store(args) => {
                let params = args.into_params()?;
                let response = handlers::store_plan(&mut self.store, &params);
                self.narrate("store_plan", &response)
            }
            PlanCommands::Status => self.show_status(),
            PlanCommands::Mark(args) => {
                let response = handlers::mark_task_completed(&mut self.store, &args.into_params());
                self.narrate("mark_task_completed", &response)
            }
            PlanCommands::Ready(args) => {
                let (params, taxonomy) = args.into_parts();
                let response =
                    handlers::ensure_next_task_ready(&mut self.store, &params, &taxonomy);
                self.narrate_readiness(&response)
            }
            PlanCommands::Reset => {
                let response = handlers::reset_plan(&mut self.store);
                self.narrate("reset_plan", &response)
            }
        }
    }

    fn show_status(&mut self) -> Result<()> {
        let response = handlers::get_plan_status(&mut self.store);
        match response["markdown"].as_str() {
            Some(markdown) => self.renderer.render(markdown),
            None => self.narrate("get_plan_status", &response),
        }
    }

    fn narrate(&self, tool_name: &str, response: &Value) -> Result<()> {
        println!("{}", format_tool_status(tool_name, response));
        Ok(())
    }

    /// Narrates a readiness response and, when blocked, lists the blocking
    /// tasks so the next actions are concrete.
    fn narrate_readiness(&self, response: &Value) -> Result<()> {
        self.narrate("ensure_next_task_ready", response)?;
        if response["status"] == "blocked" {
            if let Some(blocking) = response["blocking_tasks"].as_array() {
                for task in blocking {
                    println!(
                        "- ({}) [{}] {}",
                        task["execution_order"].as_str().unwrap_or_default(),
                        task["agent_name"].as_str().unwrap_or_default(),
                        task["task_description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Ok(())
    }
}
