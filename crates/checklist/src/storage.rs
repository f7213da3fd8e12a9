//! JSON file storage for checklists.
//!
//! One file per task key under `.taskdeck/checklists/`. Writes are
//! last-write-wins on the local file; there is no locking.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::entities::Checklist;
use crate::error::ChecklistError;

/// Directory holding checklist files, relative to the store root.
const CHECKLIST_DIR: &str = ".taskdeck/checklists";

/// File-based checklist storage.
pub struct ChecklistStore {
    dir: PathBuf,
}

impl ChecklistStore {
    /// Create a store rooted at `root` (typically the project directory).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(CHECKLIST_DIR),
        }
    }

    /// Path of the checklist file for a task key.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Whether a checklist exists for the task.
    pub async fn exists(&self, key: &str) -> bool {
        fs::metadata(self.path_for(key)).await.is_ok()
    }

    /// Load the checklist for a task key.
    pub async fn load(&self, key: &str) -> Result<Checklist, ChecklistError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => {
                let list = serde_json::from_str(&content)?;
                Ok(list)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ChecklistError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the checklist for a task key, creating and persisting a
    /// fresh template when none exists yet.
    pub async fn load_or_create(&self, key: &str) -> Result<Checklist, ChecklistError> {
        match self.load(key).await {
            Ok(list) => Ok(list),
            Err(ChecklistError::NotFound { .. }) => {
                let list = Checklist::from_template(key);
                self.save(&list).await?;
                Ok(list)
            }
            Err(e) => Err(e),
        }
    }

    /// Persist a checklist, creating the storage directory on demand.
    pub async fn save(&self, list: &Checklist) -> Result<(), ChecklistError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&list.task_key);
        let content = serde_json::to_string_pretty(list)?;
        fs::write(&path, content).await?;
        debug!(path = %path.display(), "Saved checklist");
        Ok(())
    }

    /// Remove the checklist file for a task key, if present.
    pub async fn remove(&self, key: &str) -> Result<(), ChecklistError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ItemState;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ChecklistStore::new(dir.path());

        let mut list = Checklist::from_template("PROJ-7");
        list.set_state(0, ItemState::Done).unwrap();
        list.set_notes(0, Some("see PR #12".to_string())).unwrap();
        store.save(&list).await.unwrap();

        let loaded = store.load("PROJ-7").await.unwrap();
        assert_eq!(loaded, list);
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ChecklistStore::new(dir.path());

        let err = store.load("PROJ-404").await.unwrap_err();
        assert!(matches!(err, ChecklistError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_load_or_create_persists_template() {
        let dir = TempDir::new().unwrap();
        let store = ChecklistStore::new(dir.path());

        let created = store.load_or_create("PROJ-9").await.unwrap();
        assert_eq!(created.progress().0, 0);
        assert!(store.exists("PROJ-9").await);

        // A second call loads the persisted file, not a new template.
        let loaded = store.load_or_create("PROJ-9").await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_save_overwrites_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let store = ChecklistStore::new(dir.path());

        let mut list = store.load_or_create("PROJ-3").await.unwrap();
        list.set_state(1, ItemState::Skipped).unwrap();
        store.save(&list).await.unwrap();

        let loaded = store.load("PROJ-3").await.unwrap();
        assert_eq!(loaded.items[1].state, ItemState::Skipped);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = ChecklistStore::new(dir.path());

        store.load_or_create("PROJ-5").await.unwrap();
        store.remove("PROJ-5").await.unwrap();
        assert!(!store.exists("PROJ-5").await);
        store.remove("PROJ-5").await.unwrap();
    }
}
