//! Session state storage for supervisor plans.
//!
//! The shared session store is a mutable key-value mapping owned by the
//! hosting runtime. The core reads and writes the well-known keys below but
//! never owns the store's lifecycle, and never caches plan state outside of
//! it — the store is the single source of truth, so multiple independent
//! callers observe a consistent plan.
//!
//! Two implementations ship with the crate: [`MemoryStore`] for in-process
//! sessions (tests, embedders) and [`sqlite::SqliteStore`] for hosts whose
//! session outlives a single process invocation.

pub mod sqlite;

use std::collections::HashMap;

use serde_json::Value;

use crate::error::Result;

/// Key under which the structured plan is persisted.
pub const PLAN_STATE_KEY: &str = "supervisor_plan";

/// Suffix appended to the plan key for the raw-text shadow copy.
pub const RAW_PLAN_KEY_SUFFIX: &str = "_raw";

/// Mutable key-value session state shared across supervisor operations.
pub trait SessionStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn insert(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removes `key` from the store. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory session store backed by a `HashMap`.
///
/// # Examples
///
/// ```rust
/// use maestro_core::store::{MemoryStore, SessionStore};
/// use serde_json::json;
///
/// let mut store = MemoryStore::new();
/// store.insert("supervisor_plan", json!([]))?;
/// assert!(store.get("supervisor_plan")?.is_some());
/// store.remove("supervisor_plan")?;
/// assert!(store.get("supervisor_plan")?.is_none());
/// # Ok::<(), maestro_core::PlanError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();
        store
            .insert(PLAN_STATE_KEY, json!({"answer": 42}))
            .expect("insert");
        assert_eq!(
            store.get(PLAN_STATE_KEY).expect("get"),
            Some(json!({"answer": 42}))
        );
    }

    #[test]
    fn removing_an_absent_key_is_a_no_op() {
        let mut store = MemoryStore::new();
        store.remove("missing").expect("remove");
        assert!(store.get("missing").expect("get").is_none());
    }
}
