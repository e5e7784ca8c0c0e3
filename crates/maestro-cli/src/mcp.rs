//! MCP server implementation for Maestro
//!
//! This module implements the Model Context Protocol server for Maestro,
//! giving AI supervisors a standardized interface to the plan state machine.
//! Every tool returns the adapter payload as JSON text content — including
//! `status: "error"` payloads — so no plan-level failure ever surfaces as a
//! protocol error.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use maestro_core::{
    handlers,
    params::{EnsureReady, MarkTask, StorePlan},
    RoleTaxonomy, SqliteStore,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

/// Parameters for storing a plan
#[derive(Debug, Deserialize, JsonSchema)]
struct StorePlanParams {
    /// Plan producer output: a JSON task list, possibly wrapped in
    /// narrative text
    plan: String,
}

/// Parameters for marking a task as completed
#[derive(Debug, Deserialize, JsonSchema)]
struct MarkTaskParams {
    /// Execution order of the task to complete
    execution_order: String,
}

/// Parameters for checking a role's readiness
#[derive(Debug, Deserialize, JsonSchema)]
struct EnsureReadyParams {
    /// Role name whose next task should be checked
    agent_name: String,
}

/// MCP server for Maestro
#[derive(Clone)]
pub struct MaestroMcpServer {
    store: Arc<Mutex<SqliteStore>>,
    taxonomy: RoleTaxonomy,
    tool_router: ToolRouter<Self>,
}

type McpResult = Result<CallToolResult, ErrorData>;

#[tool_router]
impl MaestroMcpServer {
    /// Create a new Maestro MCP server over an open session store
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            taxonomy: RoleTaxonomy::default(),
            tool_router: Self::tool_router(),
        }
    }

    fn payload_result(payload: &Value) -> McpResult {
        let text = serde_json::to_string_pretty(payload).map_err(|e| {
            ErrorData::internal_error(format!("Failed to serialize response: {e}"), None)
        })?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        name = "store_plan",
        description = "Store the supervisor plan from planner output. Accepts the planner's response as-is: a JSON list of stages (each with a 'tasks' list of execution_order/task_description/agent_name entries), optionally surrounded by narrative text. Replaces any previously stored plan. Returns task and stage counts, or a plan_parsing_error payload when no valid plan can be extracted."
    )]
    async fn store_plan(&self, Parameters(params): Parameters<StorePlanParams>) -> McpResult {
        debug!("store_plan: {} byte(s) of planner output", params.plan.len());

        let mut store = self.store.lock().await;
        let response = handlers::store_plan(&mut *store, &StorePlan { plan: params.plan });
        Self::payload_result(&response)
    }

    #[tool(
        name = "mark_task_completed",
        description = "Mark one task of the stored plan as completed, identified by its execution_order. Completion is one-way and idempotent; stage completion is recomputed automatically. Returns the updated completion counters, or a plan_not_found/task_not_found error payload."
    )]
    async fn mark_task_completed(
        &self,
        Parameters(params): Parameters<MarkTaskParams>,
    ) -> McpResult {
        debug!("mark_task_completed: {:?}", params);

        let mut store = self.store.lock().await;
        let response = handlers::mark_task_completed(
            &mut *store,
            &MarkTask {
                execution_order: params.execution_order,
            },
        );
        Self::payload_result(&response)
    }

    #[tool(
        name = "get_plan_status",
        description = "Get the current plan status: completion counters per task and stage plus a ready-to-display markdown rendering of the whole plan. Safe to call at any time; an absent plan reports zeroed counters, not an error."
    )]
    async fn get_plan_status(&self) -> McpResult {
        debug!("get_plan_status");

        let mut store = self.store.lock().await;
        let response = handlers::get_plan_status(&mut *store);
        Self::payload_result(&response)
    }

    #[tool(
        name = "reset_plan",
        description = "Clear the stored supervisor plan and its raw text from the session. Use when starting a new engagement or after the final deliverable is accepted."
    )]
    async fn reset_plan(&self) -> McpResult {
        debug!("reset_plan");

        let mut store = self.store.lock().await;
        let response = handlers::reset_plan(&mut *store);
        Self::payload_result(&response)
    }

    #[tool(
        name = "ensure_next_task_ready",
        description = "Check whether the given role may start its next pending task. Returns ready with the task, or blocked with the full list of lower-order incomplete tasks and a reason: data_not_ready when only upstream data collection is outstanding, prerequisites_incomplete otherwise. A blocked result is a normal outcome, not a failure."
    )]
    async fn ensure_next_task_ready(
        &self,
        Parameters(params): Parameters<EnsureReadyParams>,
    ) -> McpResult {
        debug!("ensure_next_task_ready: {:?}", params);

        let mut store = self.store.lock().await;
        let response = handlers::ensure_next_task_ready(
            &mut *store,
            &EnsureReady {
                agent_name: params.agent_name,
            },
            &self.taxonomy,
        );
        Self::payload_result(&response)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for MaestroMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "maestro".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                r#"Maestro tracks the task plan a supervisor delegates to specialist worker roles.

## Core Concepts
- **Plan**: the ordered list of stages produced by the planner; one plan per session
- **Stage**: a milestone grouping of tasks; completed when all its tasks are
- **Task**: an atomic unit of work with an execution_order, a description and an owning agent_name

## Workflow
1. Ask the planner role for a plan, then persist its answer verbatim with `store_plan` — narrative text around the JSON list is fine
2. Before delegating to a worker, call `ensure_next_task_ready` with its agent_name; only delegate on a `ready` response
3. After a worker finishes, call `mark_task_completed` with the task's execution_order
4. Use `get_plan_status` whenever the user asks for progress; relay the `markdown` field
5. `reset_plan` clears the session for a new engagement

## Responses
Every tool returns a JSON payload with a `status` discriminator. Payloads with `status: "error"` carry a stable `error` code (plan_parsing_error, plan_not_found, task_not_found) plus a human-readable `message`; `blocked` payloads enumerate the blocking tasks. Relay `message` texts to the user verbatim — they are already localized."#
                    .to_string(),
            ),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: MaestroMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Maestro MCP server on stdio");

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
