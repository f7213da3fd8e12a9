//! Ingest-validated task shapes.
//!
//! The tracker's issue objects are loosely shaped: status may be absent,
//! version associations may be missing fields, release dates arrive as
//! free-text strings. Everything is normalized here so the rest of the
//! system works with plain owned values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task assigned to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque stable identifier, unique per task
    pub id: String,
    /// Human-readable ticket code, e.g. `PROJ-123`
    pub key: String,
    /// One-line summary
    #[serde(default)]
    pub summary: String,
    /// Free-text status label from the tracker
    #[serde(default)]
    pub status: String,
    /// Release versions the task is associated with, in tracker order
    #[serde(default)]
    pub versions: Vec<VersionRef>,
}

/// A release version a task is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    pub name: String,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// Parse a tracker date string, tolerating absence and garbage.
///
/// The tracker emits `YYYY-MM-DD`; anything else becomes `None` rather
/// than failing the whole response.
pub(crate) fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_date_valid() {
        assert_eq!(
            parse_release_date(Some("2024-06-01")),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
    }

    #[test]
    fn test_parse_release_date_tolerates_garbage() {
        assert_eq!(parse_release_date(Some("next tuesday")), None);
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(None), None);
    }

    #[test]
    fn test_task_defaults_for_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"id":"1","key":"PROJ-1"}"#)
            .expect("minimal task should deserialize");
        assert!(task.status.is_empty());
        assert!(task.versions.is_empty());
    }
}
