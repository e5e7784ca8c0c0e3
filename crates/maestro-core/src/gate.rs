//! Readiness gating for role-owned tasks.
//!
//! A role's next task may start only when every incomplete task with a
//! strictly lower execution order — regardless of owner — is done. When the
//! gate blocks, the reason is classified by who owns the blockers: if all of
//! them belong to upstream data-provisioning roles the caller is waiting on
//! data, otherwise on ordinary prerequisites. Callers act differently on the
//! two, so the distinction is part of the contract.
//!
//! A blocked outcome is a normal result of the gating algorithm, not a
//! failure; it is logged at debug level only.

use std::collections::BTreeSet;

use log::debug;

use crate::{
    error::{PlanError, Result},
    manager::PlanManager,
    models::Task,
};

/// Role treated as an upstream data provider by default.
pub const DEFAULT_UPSTREAM_PROVIDER_ROLE: &str = "data_collector_agent";

/// Classification of worker roles used to explain blocked outcomes.
///
/// Roles tagged as upstream providers produce the data other roles consume;
/// the set is configuration, so new provider roles classify correctly
/// without code changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTaxonomy {
    upstream_providers: BTreeSet<String>,
}

impl RoleTaxonomy {
    /// Creates a taxonomy with the given upstream provider role names.
    pub fn new<I, S>(upstream_providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            upstream_providers: upstream_providers
                .into_iter()
                .map(|role| role.into().trim().to_string())
                .collect(),
        }
    }

    /// Whether `agent_name` is tagged as an upstream data provider.
    pub fn is_upstream_provider(&self, agent_name: &str) -> bool {
        self.upstream_providers.contains(agent_name)
    }
}

impl Default for RoleTaxonomy {
    fn default() -> Self {
        Self::new([DEFAULT_UPSTREAM_PROVIDER_ROLE])
    }
}

/// Reason a candidate task is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedReason {
    /// Every blocking task is owned by an upstream data-provisioning role
    DataNotReady,
    /// At least one blocking task belongs to an ordinary role
    PrerequisitesIncomplete,
}

impl BlockedReason {
    /// Stable machine-checkable code surfaced at the tool boundary.
    pub fn code(&self) -> &'static str {
        match self {
            BlockedReason::DataNotReady => "data_not_ready",
            BlockedReason::PrerequisitesIncomplete => "prerequisites_incomplete",
        }
    }
}

/// Outcome of gating a role's next pending task.
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// The role's earliest pending task may proceed
    Ready {
        /// The candidate task
        task: Task,
    },
    /// Lower-order incomplete tasks must finish first
    Blocked {
        /// Why the candidate is blocked
        reason: BlockedReason,
        /// Every incomplete task ordered before the candidate, in plan order
        blocking: Vec<Task>,
    },
    /// The role owns no incomplete task — distinct from ready and blocked
    NoPendingTasks,
}

/// Determines whether `agent_name`'s next pending task may proceed.
///
/// The candidate is the role's incomplete task with the lowest execution
/// order. The blocking set is every incomplete task, any owner, ordered
/// strictly before the candidate.
///
/// # Errors
///
/// Returns [`PlanError::PlanNotFound`] when no plan is stored in the
/// session.
pub fn ensure_next_task_ready(
    manager: &PlanManager<'_>,
    agent_name: &str,
    taxonomy: &RoleTaxonomy,
) -> Result<Readiness> {
    if manager.load_plan()?.is_empty() {
        return Err(PlanError::PlanNotFound);
    }

    let agent_name = agent_name.trim();
    let mut pending: Vec<Task> = manager.pending_tasks()?.collect();
    pending.sort_by(|a, b| a.order_key().total_cmp(&b.order_key()));

    let Some(candidate) = pending
        .iter()
        .find(|task| task.agent_name == agent_name)
        .cloned()
    else {
        debug!("No pending task owned by '{agent_name}'");
        return Ok(Readiness::NoPendingTasks);
    };

    let blocking: Vec<Task> = pending
        .iter()
        .filter(|task| task.order_key() < candidate.order_key())
        .cloned()
        .collect();

    if blocking.is_empty() {
        debug!(
            "Task {} is ready for '{agent_name}'",
            candidate.execution_order
        );
        return Ok(Readiness::Ready { task: candidate });
    }

    let reason = if blocking
        .iter()
        .all(|task| taxonomy.is_upstream_provider(&task.agent_name))
    {
        BlockedReason::DataNotReady
    } else {
        BlockedReason::PrerequisitesIncomplete
    };

    debug!(
        "Task {} for '{agent_name}' is blocked by {} task(s) ({})",
        candidate.execution_order,
        blocking.len(),
        reason.code()
    );
    Ok(Readiness::Blocked { reason, blocking })
}
