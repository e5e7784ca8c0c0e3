//! Core library for the Maestro supervisor plan state machine.
//!
//! This crate turns a plan producer's loosely-formatted output (free text
//! embedding a JSON task list) into a validated, mutable plan; tracks
//! completion of individual tasks and aggregate stages; and gates whether a
//! given worker role may begin its next task based on completion of
//! lower-order tasks owned by other roles.
//!
//! # Architecture
//!
//! State lives in a host-owned [`store::SessionStore`]; the core never
//! caches a plan across operations. The [`manager::PlanManager`] is the
//! stateful façade, the [`gate`] decides readiness, and the [`handlers`]
//! wrap both behind structured payloads so no error crosses the tool
//! boundary.
//!
//! # Quick Start
//!
//! ```rust
//! use maestro_core::{handlers, params::StorePlan, store::MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let plan_text = r#"O plano final:
//! [{"tasks": [{"execution_order": 1,
//!              "task_description": "Confirmar escopo",
//!              "agent_name": "supervisor_agent"}]}]"#;
//!
//! let response = handlers::store_plan(
//!     &mut store,
//!     &StorePlan { plan: plan_text.to_string() },
//! );
//! assert_eq!(response["status"], "stored");
//! assert_eq!(response["total_tasks"], 1);
//! ```

pub mod display;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod params;
pub mod parser;
pub mod store;

// Re-export commonly used types
pub use display::{format_tool_status, PlanMarkdown};
pub use error::{PlanError, Result};
pub use gate::{BlockedReason, Readiness, RoleTaxonomy};
pub use manager::PlanManager;
pub use models::{Plan, Stage, Summary, Task};
pub use store::{
    sqlite::{SqliteStore, StoreBuilder},
    MemoryStore, SessionStore, PLAN_STATE_KEY,
};
