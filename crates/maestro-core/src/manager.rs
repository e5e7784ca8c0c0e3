//! Stateful façade over the session store.
//!
//! The manager owns no plan state of its own: every operation is a single
//! read-parse-mutate-write sequence against the injected session store, so
//! multiple independent callers (tools, the readiness gate, status queries)
//! observe one consistent plan.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   PlanManager   │    │  SessionStore   │
//! │ (tool adapter)  │───▶│ (this module)   │───▶│ (host-owned KV) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Boundary payloads     Business logic        Source of truth
//! ```
//!
//! The structured plan lives under the plan key; the raw producer text is
//! shadowed under the derived `_raw` key for audit and is written only when
//! a new plan is set, never on task-completion updates.

use serde_json::Value;

use crate::{
    display::PlanMarkdown,
    error::{PlanError, Result},
    models::{Plan, Stage, Summary, Task},
    parser::parse_plan_text,
    store::{SessionStore, PLAN_STATE_KEY, RAW_PLAN_KEY_SUFFIX},
};

/// Encapsulates all plan management logic for the supervisor.
pub struct PlanManager<'a> {
    store: &'a mut dyn SessionStore,
    plan_key: String,
    raw_key: String,
}

impl<'a> PlanManager<'a> {
    /// Creates a manager over `store` using the default plan key.
    pub fn new(store: &'a mut dyn SessionStore) -> Self {
        Self::with_plan_key(store, PLAN_STATE_KEY)
    }

    /// Creates a manager over `store` using a custom plan key.
    ///
    /// The raw-text shadow key is derived by suffixing the plan key.
    pub fn with_plan_key(store: &'a mut dyn SessionStore, plan_key: &str) -> Self {
        Self {
            store,
            plan_key: plan_key.to_string(),
            raw_key: format!("{plan_key}{RAW_PLAN_KEY_SUFFIX}"),
        }
    }

    /// Parses producer output and persists it as the new plan.
    ///
    /// Replaces any previous plan and its raw text entirely — a full resync,
    /// never a merge.
    pub fn set_plan_from_text(&mut self, producer_output: &str) -> Result<Plan> {
        let plan = parse_plan_text(producer_output)?;
        self.persist_plan(&plan, Some(producer_output))?;
        Ok(plan)
    }

    /// Rehydrates the stored plan into typed stages and tasks.
    ///
    /// Returns an empty plan when nothing is stored; that is not an error,
    /// status queries must work at any time.
    pub fn load_plan(&self) -> Result<Plan> {
        let stored = match self.store.get(&self.plan_key)? {
            Some(value) => value,
            None => return Ok(Vec::new()),
        };
        let items = stored
            .as_array()
            .ok_or_else(|| PlanError::parsing("Stored plan must be a JSON list"))?;
        items.iter().map(Stage::from_value).collect()
    }

    /// Marks the task with the given execution order as completed.
    ///
    /// The order is normalized to its trimmed form and matched exactly, in
    /// plan order. Completion is one-way: re-marking a completed task is a
    /// no-op. The owning stage's derived completion is refreshed and the
    /// full plan re-persisted.
    ///
    /// # Errors
    ///
    /// [`PlanError::PlanNotFound`] when no plan is stored — there is no
    /// sensible operation to perform on an absent plan — and
    /// [`PlanError::TaskNotFound`] when no task matches; the store is left
    /// untouched in both cases.
    pub fn mark_task_completed(&mut self, execution_order: &str) -> Result<Task> {
        let mut plan = self.load_plan()?;
        if plan.is_empty() {
            return Err(PlanError::PlanNotFound);
        }

        let target_order = execution_order.trim();
        let mut updated: Option<Task> = None;
        'stages: for stage in &mut plan {
            for idx in 0..stage.tasks.len() {
                if stage.tasks[idx].execution_order == target_order {
                    if !stage.tasks[idx].completed {
                        stage.tasks[idx].completed = true;
                        stage.refresh_completion();
                    }
                    updated = Some(stage.tasks[idx].clone());
                    break 'stages;
                }
            }
        }

        let updated = updated.ok_or_else(|| PlanError::TaskNotFound {
            execution_order: target_order.to_string(),
        })?;
        self.persist_plan(&plan, None)?;
        Ok(updated)
    }

    /// Returns the incomplete tasks in plan order.
    ///
    /// The sequence is computed from the stored plan at call time; calling
    /// again restarts from current state.
    pub fn pending_tasks(&self) -> Result<impl Iterator<Item = Task>> {
        let plan = self.load_plan()?;
        Ok(plan
            .into_iter()
            .flat_map(|stage| stage.tasks)
            .filter(|task| !task.completed))
    }

    /// Computes the summary of the current plan (all zeros when none).
    pub fn summary(&self) -> Result<Summary> {
        Ok(Summary::from_stages(&self.load_plan()?))
    }

    /// Renders the fixed markdown status document for the current plan.
    pub fn render_markdown(&self) -> Result<String> {
        Ok(PlanMarkdown(&self.load_plan()?).to_string())
    }

    /// Removes the plan and its raw-text shadow from the session store.
    pub fn reset_plan(&mut self) -> Result<()> {
        self.store.remove(&self.plan_key)?;
        self.store.remove(&self.raw_key)
    }

    fn persist_plan(&mut self, plan: &[Stage], raw_text: Option<&str>) -> Result<()> {
        let value = Value::Array(plan.iter().map(Stage::to_value).collect());
        self.store.insert(&self.plan_key, value)?;
        if let Some(text) = raw_text {
            self.store
                .insert(&self.raw_key, Value::String(text.to_string()))?;
        }
        Ok(())
    }
}
