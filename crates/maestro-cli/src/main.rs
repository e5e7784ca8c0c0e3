//! Maestro CLI Application
//!
//! Command-line interface for the Maestro supervisor plan tool.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use maestro_core::StoreBuilder;
use mcp::{run_stdio_server, MaestroMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        state_file,
        no_color,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_state_path(state_file)
        .open()
        .context("Failed to open session state")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Maestro started");

    match command {
        Plan { command } => Cli::new(store, renderer).handle_plan_command(command),
        Serve => {
            info!("Starting Maestro MCP server");
            run_stdio_server(MaestroMcpServer::new(store))
                .await
                .context("MCP server failed")
        }
    }
}
