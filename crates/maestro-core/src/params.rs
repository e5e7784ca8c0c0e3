//! Parameter structures for supervisor plan operations.
//!
//! Shared across interfaces (CLI, MCP) without framework-specific derives in
//! the core: the `schema` feature adds `schemars::JsonSchema` so the MCP
//! layer can generate tool schemas, while the CLI converts its clap argument
//! structs into these types.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for storing a plan from producer output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StorePlan {
    /// Producer output: a JSON task list, possibly wrapped in narrative text
    pub plan: String,
}

/// Parameters for marking a task as completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MarkTask {
    /// Execution order of the task to complete
    pub execution_order: String,
}

/// Parameters for gating a role's next pending task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct EnsureReady {
    /// Role name whose next task should be checked
    pub agent_name: String,
}
