//! Error types for the supervisor plan library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all supervisor plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed stage or task shape encountered during model construction
    #[error("Invalid input for field '{field}': {reason}")]
    Structure { field: String, reason: String },
    /// Plan producer output that cannot be turned into a plan
    #[error("{message}")]
    Parsing { message: String },
    /// An operation that requires a plan ran against an empty session
    #[error("No plan found in session state.")]
    PlanNotFound,
    /// Task lookup by execution order failed
    #[error("Task with execution_order '{execution_order}' was not found.")]
    TaskNotFound { execution_order: String },
    /// Session store read or write errors
    #[error("Session store error: {message}")]
    Store {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl PlanError {
    /// Creates a structure error for a malformed field.
    pub fn structure(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structure {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parsing error with the given message.
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    /// Stable machine-checkable code surfaced at the tool boundary.
    ///
    /// Structure errors fold into `plan_parsing_error`: a malformed stage or
    /// task is indistinguishable from unparseable output as far as callers
    /// are concerned. Infrastructure failures share one code since the
    /// caller's recovery (fix the session store) is the same for all of them.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::Structure { .. } | PlanError::Parsing { .. } => "plan_parsing_error",
            PlanError::PlanNotFound => "plan_not_found",
            PlanError::TaskNotFound { .. } => "task_not_found",
            PlanError::Store { .. }
            | PlanError::FileSystem { .. }
            | PlanError::XdgDirectory(_)
            | PlanError::Serialization { .. } => "session_store_error",
        }
    }
}

/// Extension trait for session-store Results backed by rusqlite.
pub trait StoreResultExt<T> {
    /// Map rusqlite errors into [`PlanError::Store`] with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::Store {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Result type alias for supervisor plan operations
pub type Result<T> = std::result::Result<T, PlanError>;
