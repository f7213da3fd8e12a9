//! Error types for checklist storage and mutation.

use thiserror::Error;

/// Errors that can occur while loading, saving, or editing a checklist.
#[derive(Debug, Error)]
pub enum ChecklistError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Checklist file could not be parsed or written as JSON
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    /// No checklist exists for the task
    #[error("no checklist found for task {key}")]
    NotFound { key: String },

    /// Item index out of range
    #[error("checklist has no item #{index}")]
    NoSuchItem { index: usize },
}
