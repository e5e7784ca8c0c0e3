//! Task model definition and related functionality.

use serde_json::{json, Map, Value};

use crate::error::{PlanError, Result};

/// Represents a single task emitted by the plan producer.
///
/// The execution order is kept in two forms: the normalized text used for
/// storage, display and exact-match lookup, and a numeric sort key used by
/// the readiness gate to compare tasks across stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Execution order as normalized (trimmed) text; unique within a plan
    pub execution_order: String,

    /// Free-text description of the work
    pub description: String,

    /// Role name of the worker that owns the task
    pub agent_name: String,

    /// Completion flag; flips false→true exactly once, never back
    pub completed: bool,

    /// Numeric sort key derived from `execution_order` at construction
    order_key: f64,
}

impl Task {
    /// Creates a task, deriving the numeric sort key from the order text.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Structure`] if the trimmed order is not a finite
    /// number.
    pub fn new(
        execution_order: impl Into<String>,
        description: impl Into<String>,
        agent_name: impl Into<String>,
        completed: bool,
    ) -> Result<Self> {
        let execution_order = execution_order.into().trim().to_string();
        let order_key = parse_order_key(&execution_order)?;
        Ok(Self {
            execution_order,
            description: description.into().trim().to_string(),
            agent_name: agent_name.into().trim().to_string(),
            completed,
            order_key,
        })
    }

    /// Builds a task from its session-store mapping.
    ///
    /// Required fields are `execution_order`, `task_description` and
    /// `agent_name`; scalar values are stringified the way the plan producer
    /// writes them, so a numeric order `1` and the text `"1"` are the same
    /// order. `task_completed` defaults to false and is coerced to bool.
    pub fn from_value(value: &Value) -> Result<Self> {
        let data = value
            .as_object()
            .ok_or_else(|| PlanError::parsing("Each task must be a JSON object"))?;

        let execution_order = scalar_field(data, "execution_order")?;
        let description = scalar_field(data, "task_description")?;
        let agent_name = scalar_field(data, "agent_name")?;
        let completed = data.get("task_completed").map(truthy).unwrap_or(false);

        Self::new(execution_order, description, agent_name, completed)
    }

    /// Serializes the task into its session-store mapping.
    pub fn to_value(&self) -> Value {
        json!({
            "execution_order": self.execution_order,
            "task_description": self.description,
            "agent_name": self.agent_name,
            "task_completed": self.completed,
        })
    }

    /// Numeric sort key for cross-stage ordering comparisons.
    pub fn order_key(&self) -> f64 {
        self.order_key
    }
}

/// Extracts a required scalar field as normalized text.
fn scalar_field(data: &Map<String, Value>, field: &str) -> Result<String> {
    match data.get(field) {
        None | Some(Value::Null) => {
            Err(PlanError::structure(field, "missing required field"))
        }
        Some(Value::String(text)) => Ok(text.trim().to_string()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(Value::Bool(flag)) => Ok(flag.to_string()),
        Some(_) => Err(PlanError::structure(field, "must be a scalar value")),
    }
}

/// JSON truthiness, mirroring how the plan producer treats the flag.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn parse_order_key(execution_order: &str) -> Result<f64> {
    execution_order
        .parse::<f64>()
        .ok()
        .filter(|key| key.is_finite())
        .ok_or_else(|| {
            PlanError::structure(
                "execution_order",
                format!("'{execution_order}' is not a number"),
            )
        })
}
