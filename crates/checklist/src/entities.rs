//! Checklist document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChecklistError;

/// The standardized items every new checklist starts with.
const TEMPLATE_ITEMS: &[&str] = &[
    "Reproduce / understand the task",
    "Write or update tests",
    "Implement the change",
    "Run the full test suite",
    "Update documentation",
    "Open a pull request",
    "Link the PR on the tracker ticket",
];

/// State of a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    #[default]
    Pending,
    Done,
    Skipped,
}

/// One entry in a checklist: a title, its state, and optional notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
    #[serde(default)]
    pub state: ItemState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ChecklistItem {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            state: ItemState::Pending,
            notes: None,
        }
    }
}

/// A per-task checklist document, backed by one JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Ticket code this checklist belongs to, e.g. `PROJ-123`
    pub task_key: String,
    pub items: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checklist {
    /// Create a fresh checklist from the standard template.
    #[must_use]
    pub fn from_template(task_key: &str) -> Self {
        let now = Utc::now();
        Self {
            task_key: task_key.to_string(),
            items: TEMPLATE_ITEMS.iter().map(|t| ChecklistItem::new(t)).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress as (settled, total), where settled counts Done and
    /// Skipped items.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let settled = self
            .items
            .iter()
            .filter(|i| i.state != ItemState::Pending)
            .count();
        (settled, self.items.len())
    }

    /// Set the state of item `index` (zero-based) and bump `updated_at`.
    pub fn set_state(&mut self, index: usize, state: ItemState) -> Result<(), ChecklistError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(ChecklistError::NoSuchItem { index })?;
        item.state = state;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace the notes of item `index`; `None` clears them.
    pub fn set_notes(
        &mut self,
        index: usize,
        notes: Option<String>,
    ) -> Result<(), ChecklistError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(ChecklistError::NoSuchItem { index })?;
        item.notes = notes.filter(|n| !n.is_empty());
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reset every item to pending and clear notes.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.state = ItemState::Pending;
            item.notes = None;
        }
        self.updated_at = Utc::now();
    }
}
