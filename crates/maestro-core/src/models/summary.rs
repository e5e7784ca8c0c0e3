//! Plan summary projection.

use serde::Serialize;

use super::Stage;

/// Aggregated metrics describing the state of a plan.
///
/// Computed on demand from the current plan; never persisted. A session with
/// no stored plan summarizes to all-zero counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Total number of tasks across all stages
    pub total_tasks: usize,
    /// Number of completed tasks
    pub completed_tasks: usize,
    /// Number of remaining tasks
    pub remaining_tasks: usize,
    /// Total number of stages
    pub total_stages: usize,
    /// Number of stages whose tasks are all completed
    pub completed_stages: usize,
}

impl Summary {
    /// Computes the summary for a plan.
    pub fn from_stages(stages: &[Stage]) -> Self {
        let total_tasks = stages.iter().map(|stage| stage.tasks.len()).sum::<usize>();
        let completed_tasks = stages
            .iter()
            .flat_map(|stage| stage.tasks.iter())
            .filter(|task| task.completed)
            .count();
        Self {
            total_tasks,
            completed_tasks,
            remaining_tasks: total_tasks - completed_tasks,
            total_stages: stages.len(),
            completed_stages: stages.iter().filter(|stage| stage.completed).count(),
        }
    }
}
