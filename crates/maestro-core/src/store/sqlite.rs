//! SQLite-backed session store for hosts with durable sessions.
//!
//! One database file holds one session. The CLI/MCP host uses this store so
//! that a supervisor session survives across process invocations; embedders
//! that keep the session in memory use [`super::MemoryStore`] instead.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::SessionStore;
use crate::error::{PlanError, Result, StoreResultExt};

/// Session store persisted in a single-table SQLite database.
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the session state file and initializes the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).store_context("Failed to open session state file")?;
        let store = Self { connection };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initializes the schema using the embedded SQL file.
    fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize session state schema")
    }
}

impl SessionStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let text: Option<String> = self
            .connection
            .query_row(
                "SELECT value FROM session_state WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .store_context("Failed to read session state")?;

        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)?;
        self.connection
            .execute(
                "INSERT INTO session_state (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, text],
            )
            .store_context("Failed to write session state")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.connection
            .execute("DELETE FROM session_state WHERE key = ?1", [key])
            .store_context("Failed to remove session state")?;
        Ok(())
    }
}

/// Builder for opening [`SqliteStore`] instances.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    state_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom session state file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/maestro/state.db` or `~/.local/share/maestro/state.db`
    pub fn with_state_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.state_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Opens the configured session store.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::FileSystem` if the parent directory cannot be
    /// created and `PlanError::Store` if the database cannot be opened.
    pub fn open(self) -> Result<SqliteStore> {
        let state_path = match self.state_path {
            Some(path) => path,
            None => Self::default_state_path()?,
        };

        if let Some(parent) = state_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlanError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        SqliteStore::open(state_path)
    }

    /// Returns the default state path following the XDG Base Directory
    /// specification.
    fn default_state_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("maestro")
            .place_data_file("state.db")
            .map_err(|e| PlanError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::store::PLAN_STATE_KEY;

    #[test]
    fn values_survive_reopening_the_same_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("state.db");

        {
            let mut store = SqliteStore::open(&path).expect("open");
            store
                .insert(PLAN_STATE_KEY, json!([{"tasks": [], "completed": true}]))
                .expect("insert");
        }

        let store = SqliteStore::open(&path).expect("reopen");
        assert_eq!(
            store.get(PLAN_STATE_KEY).expect("get"),
            Some(json!([{"tasks": [], "completed": true}]))
        );
    }

    #[test]
    fn insert_replaces_previous_value() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = SqliteStore::open(temp_dir.path().join("state.db")).expect("open");

        store.insert("k", json!(1)).expect("insert");
        store.insert("k", json!(2)).expect("insert");
        assert_eq!(store.get("k").expect("get"), Some(json!(2)));
    }

    #[test]
    fn remove_is_a_no_op_for_absent_keys() {
        let temp_dir = TempDir::new().expect("temp dir");
        let mut store = SqliteStore::open(temp_dir.path().join("state.db")).expect("open");
        store.remove("missing").expect("remove");
    }

    #[test]
    fn builder_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("temp dir");
        let nested = temp_dir.path().join("deep").join("state.db");

        let store = StoreBuilder::new()
            .with_state_path(Some(&nested))
            .open()
            .expect("open");
        assert!(store.get("anything").expect("get").is_none());
        assert!(nested.exists());
    }
}
