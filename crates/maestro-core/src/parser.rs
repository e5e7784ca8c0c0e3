//! Parsing of plan producer output into a typed plan.
//!
//! Plan producers narrate: the JSON task list usually arrives wrapped in
//! free-form commentary before and after the payload. Parsing is therefore
//! two-tier — try the whole string as JSON first, then fall back to the
//! first top-level balanced `[...]` span. Callers never need to pre-strip
//! the prose.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    error::{PlanError, Result},
    models::{Plan, Stage},
};

/// Parses plan producer output into a validated plan.
///
/// # Errors
///
/// Returns [`PlanError::Parsing`] when no JSON array can be isolated or the
/// payload is not an array, and [`PlanError::Structure`] when a stage or
/// task inside the array is malformed or an execution order repeats.
///
/// # Examples
///
/// ```rust
/// use maestro_core::parser::parse_plan_text;
///
/// let text = r#"Segue o plano:
/// [{"tasks": [{"execution_order": 1,
///              "task_description": "Confirmar escopo",
///              "agent_name": "supervisor_agent"}]}]
/// Qualquer dúvida, avise."#;
///
/// let plan = parse_plan_text(text)?;
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan[0].tasks[0].execution_order, "1");
/// # Ok::<(), maestro_core::PlanError>(())
/// ```
pub fn parse_plan_text(text: &str) -> Result<Plan> {
    let data = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => {
            let span = extract_first_json_array(text)
                .ok_or_else(|| PlanError::parsing("Planner output is not valid JSON"))?;
            serde_json::from_str(span)
                .map_err(|_| PlanError::parsing("Planner output is not valid JSON"))?
        }
    };

    let items = data
        .as_array()
        .ok_or_else(|| PlanError::parsing("Planner output must be a JSON list"))?;

    let stages = items
        .iter()
        .map(Stage::from_value)
        .collect::<Result<Vec<_>>>()?;

    ensure_unique_orders(&stages)?;
    Ok(stages)
}

/// Finds the first top-level balanced `[...]` span in `text`.
///
/// Bracket-depth counting only; the payload is assumed to be well-formed
/// JSON once isolated, so brackets inside string literals are not handled.
fn extract_first_json_array(text: &str) -> Option<&str> {
    let mut start = None;
    let mut depth = 0usize;
    for (index, character) in text.char_indices() {
        match character {
            '[' => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            ']' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|begin| &text[begin..=index]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rejects plans where the same normalized execution order appears twice.
fn ensure_unique_orders(stages: &[Stage]) -> Result<()> {
    let mut seen = HashSet::new();
    for stage in stages {
        for task in &stage.tasks {
            if !seen.insert(task.execution_order.as_str()) {
                return Err(PlanError::structure(
                    "execution_order",
                    format!("duplicate value '{}'", task.execution_order),
                ));
            }
        }
    }
    Ok(())
}
