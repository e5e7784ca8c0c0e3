//! Stage model definition and related functionality.

use serde_json::{json, Value};

use super::Task;
use crate::error::{PlanError, Result};

/// A stage groups together tasks that share a common milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Tasks in execution order
    pub tasks: Vec<Task>,

    /// Derived completion flag; true iff every task is completed
    pub completed: bool,
}

impl Stage {
    /// Creates a stage from its tasks, deriving the completion flag.
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut stage = Self {
            tasks,
            completed: false,
        };
        stage.refresh_completion();
        stage
    }

    /// Builds a stage from its session-store mapping.
    ///
    /// The `tasks` field must be list-shaped; the stored `completed` flag is
    /// never trusted — completion is re-derived from the tasks.
    pub fn from_value(value: &Value) -> Result<Self> {
        let data = value
            .as_object()
            .ok_or_else(|| PlanError::parsing("Each stage must be a JSON object"))?;

        let tasks = match data.get("tasks") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Task::from_value)
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(PlanError::structure("tasks", "must be a list")),
        };

        Ok(Self::new(tasks))
    }

    /// Serializes the stage into its session-store mapping.
    pub fn to_value(&self) -> Value {
        json!({
            "tasks": self.tasks.iter().map(Task::to_value).collect::<Vec<_>>(),
            "completed": self.completed,
        })
    }

    /// Re-derives the completion flag from the tasks.
    ///
    /// A stage with zero tasks counts as completed.
    pub fn refresh_completion(&mut self) {
        self.completed = self.tasks.iter().all(|task| task.completed);
    }
}
