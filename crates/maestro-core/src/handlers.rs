//! Tool adapter: boundary functions for the orchestration host.
//!
//! Each handler takes primitive inputs plus the shared session store and
//! returns a structured payload tagged with a `status` discriminator. Every
//! error raised by the manager or the gate is caught here and converted into
//! a `status: "error"` payload carrying a stable `error` code and a
//! human-readable `message` — no error crosses this boundary. Store
//! mutations happen only on success paths: a failed parse or failed lookup
//! leaves the session untouched.
//!
//! ```text
//! Host (CLI/MCP) → handlers → PlanManager / gate → SessionStore
//! ```

use log::info;
use serde_json::{json, Value};

use crate::{
    display::markdown::NO_PLAN_SENTENCE,
    error::PlanError,
    gate::{self, BlockedReason, Readiness, RoleTaxonomy},
    manager::PlanManager,
    models::{Summary, Task},
    params::{EnsureReady, MarkTask, StorePlan},
    store::SessionStore,
};

/// Parses and stores a new plan, replacing any previous one.
pub fn store_plan(store: &mut dyn SessionStore, params: &StorePlan) -> Value {
    let mut manager = PlanManager::new(store);
    let plan = match manager.set_plan_from_text(&params.plan) {
        Ok(plan) => plan,
        Err(error) => return error_payload(&error),
    };

    let summary = Summary::from_stages(&plan);
    info!(
        "Stored supervisor plan with {} task(s) in {} stage(s)",
        summary.total_tasks, summary.total_stages
    );
    json!({
        "status": "stored",
        "total_tasks": summary.total_tasks,
        "pending_tasks": summary.remaining_tasks,
        "stages": summary.total_stages,
        "has_plan": summary.total_stages > 0,
        "message": format!(
            "Plano armazenado com {} tarefa(s) em {} etapa(s).",
            summary.total_tasks, summary.total_stages
        ),
    })
}

/// Marks the task with the given execution order as completed.
pub fn mark_task_completed(store: &mut dyn SessionStore, params: &MarkTask) -> Value {
    let mut manager = PlanManager::new(store);
    let task = match manager.mark_task_completed(&params.execution_order) {
        Ok(task) => task,
        Err(error) => return error_payload(&error),
    };
    let summary = match manager.summary() {
        Ok(summary) => summary,
        Err(error) => return error_payload(&error),
    };

    info!("Marked task {} as completed", task.execution_order);
    json!({
        "status": "task_completed",
        "execution_order": task.execution_order,
        "total_completed": summary.completed_tasks,
        "remaining_tasks": summary.remaining_tasks,
        "message": format!("Tarefa {} marcada como concluída.", task.execution_order),
    })
}

/// Reports the current plan state: summary counters plus the markdown view.
///
/// An absent plan is not an error — the payload carries zeroed counters and
/// the fixed no-plan sentence so status queries work at any time.
pub fn get_plan_status(store: &mut dyn SessionStore) -> Value {
    let manager = PlanManager::new(store);
    let summary = match manager.summary() {
        Ok(summary) => summary,
        Err(error) => return error_payload(&error),
    };
    let markdown = match manager.render_markdown() {
        Ok(markdown) => markdown,
        Err(error) => return error_payload(&error),
    };

    let has_plan = summary.total_stages > 0;
    let message = if has_plan {
        format!(
            "Plano com {} de {} tarefa(s) concluída(s).",
            summary.completed_tasks, summary.total_tasks
        )
    } else {
        NO_PLAN_SENTENCE.to_string()
    };
    json!({
        "status": "plan_status",
        "has_plan": has_plan,
        "summary": summary,
        "markdown": markdown,
        "message": message,
    })
}

/// Clears the plan and its raw-text shadow from the session.
pub fn reset_plan(store: &mut dyn SessionStore) -> Value {
    let mut manager = PlanManager::new(store);
    if let Err(error) = manager.reset_plan() {
        return error_payload(&error);
    }

    info!("Supervisor plan state cleared");
    json!({
        "status": "reset",
        "message": "Plano do supervisor removido da sessão.",
    })
}

/// Checks whether the role's next pending task may proceed.
pub fn ensure_next_task_ready(
    store: &mut dyn SessionStore,
    params: &EnsureReady,
    taxonomy: &RoleTaxonomy,
) -> Value {
    let manager = PlanManager::new(store);
    match gate::ensure_next_task_ready(&manager, &params.agent_name, taxonomy) {
        Ok(Readiness::Ready { task }) => json!({
            "status": "ready",
            "next_task": task.to_value(),
            "message": format!(
                "Tarefa {} pronta para execução por {}.",
                task.execution_order, task.agent_name
            ),
        }),
        Ok(Readiness::Blocked { reason, blocking }) => {
            let orders = blocking
                .iter()
                .map(|task| task.execution_order.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let message = match reason {
                BlockedReason::DataNotReady => format!(
                    "Os dados ainda não estão disponíveis: conclua primeiro a(s) tarefa(s) {orders} de coleta."
                ),
                BlockedReason::PrerequisitesIncomplete => format!(
                    "Existem pré-requisitos pendentes: conclua primeiro a(s) tarefa(s) {orders}."
                ),
            };
            json!({
                "status": "blocked",
                "error": reason.code(),
                "blocking_tasks": blocking.iter().map(blocking_task_value).collect::<Vec<_>>(),
                "message": message,
            })
        }
        Ok(Readiness::NoPendingTasks) => json!({
            "status": "error",
            "error": "task_not_found",
            "message": format!(
                "Nenhuma tarefa pendente encontrada para {}.",
                params.agent_name.trim()
            ),
        }),
        Err(error) => error_payload(&error),
    }
}

fn blocking_task_value(task: &Task) -> Value {
    json!({
        "execution_order": task.execution_order,
        "agent_name": task.agent_name,
        "task_description": task.description,
    })
}

fn error_payload(error: &PlanError) -> Value {
    json!({
        "status": "error",
        "error": error.code(),
        "message": error.to_string(),
    })
}
