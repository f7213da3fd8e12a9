//! Categorization of assigned tasks into display groups.
//!
//! Every input task lands in exactly one [`VersionGroup`]; groups are
//! rebuilt from scratch on each call and never persisted.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracker::Task;

/// Status fragments that mark a task as finished.
const DONE_SYNONYMS: &[&str] = &["done", "closed", "resolved", "complete", "finished"];

/// Status fragments that mark a task as abandoned.
const DISCARDED_SYNONYMS: &[&str] = &[
    "discard", "won't do", "wont do", "cancelled", "canceled", "invalid", "obsolete", "reject",
];

/// Category a task falls into, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Done,
    Discarded,
    NoVersion,
    Unreleased,
    Released,
}

/// The finest-grained display bucket: tasks sharing a category and,
/// where one applies, a version name.
#[derive(Debug, Clone)]
pub struct VersionGroup {
    pub category: Category,
    pub version: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub tasks: Vec<Task>,
}

impl VersionGroup {
    fn new(category: Category, version: Option<String>, release_date: Option<NaiveDate>) -> Self {
        Self {
            category,
            version,
            release_date,
            tasks: Vec::new(),
        }
    }

    /// Display title for the group header.
    #[must_use]
    pub fn title(&self) -> String {
        match self.category {
            Category::Done => "Done".to_string(),
            Category::Discarded => "Discarded".to_string(),
            Category::NoVersion => "No version".to_string(),
            Category::Unreleased | Category::Released => {
                let name = self.version.as_deref().unwrap_or("(unnamed)");
                match self.release_date {
                    Some(date) => format!("{name} ({date})"),
                    None => name.to_string(),
                }
            }
        }
    }

    /// Whether the UI should render this group collapsed initially.
    #[must_use]
    pub fn collapsed_by_default(&self) -> bool {
        matches!(self.category, Category::Done | Category::Discarded)
    }
}

/// The coarsest-grained display bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainGroupKind {
    UnreleasedVersions,
    ReleasedVersions,
    DoneAndDiscarded,
}

impl MainGroupKind {
    /// Display label for the bucket header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnreleasedVersions => "Unreleased Versions",
            Self::ReleasedVersions => "Released Versions",
            Self::DoneAndDiscarded => "Done & Discarded",
        }
    }
}

/// An ordered list of version groups under one top-level bucket.
#[derive(Debug, Clone)]
pub struct MainGroup {
    pub kind: MainGroupKind,
    pub groups: Vec<VersionGroup>,
}

/// Case-insensitive containment check against a synonym set.
fn status_contains_any(status: &str, synonyms: &[&str]) -> bool {
    let status = status.to_lowercase();
    synonyms.iter().any(|s| status.contains(s))
}

/// Find or create the group for (category, version name), preserving
/// first-seen order until the final sort.
fn group_for<'a>(
    groups: &'a mut Vec<VersionGroup>,
    category: Category,
    version: Option<&str>,
    release_date: Option<NaiveDate>,
) -> &'a mut VersionGroup {
    let pos = groups
        .iter()
        .position(|g| g.version.as_deref() == version);
    match pos {
        Some(i) => &mut groups[i],
        None => {
            groups.push(VersionGroup::new(
                category,
                version.map(ToString::to_string),
                release_date,
            ));
            let last = groups.len() - 1;
            &mut groups[last]
        }
    }
}

/// Unreleased order: ascending by date, dated before undated, undated
/// ties alphabetical ascending by name.
fn unreleased_order(a: &VersionGroup, b: &VersionGroup) -> Ordering {
    match (a.release_date, b.release_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.version.cmp(&b.version),
    }
}

/// Released order: descending by date, dated before undated, undated
/// ties alphabetical descending by name. The reversed tie-break mirrors
/// the long-standing display behavior and is covered by tests.
fn released_order(a: &VersionGroup, b: &VersionGroup) -> Ordering {
    match (a.release_date, b.release_date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.version.cmp(&a.version),
    }
}

/// Categorize tasks into the ordered main-group tree.
///
/// Matching priority per task: done synonyms, then discarded synonyms,
/// then the first version association (or its absence). Tasks with no
/// version land in a "No version" group appended to the Released bucket.
/// Pure: the input is not mutated and no task is dropped or duplicated.
#[must_use]
pub fn categorize(tasks: &[Task]) -> Vec<MainGroup> {
    let mut unreleased: Vec<VersionGroup> = Vec::new();
    let mut released: Vec<VersionGroup> = Vec::new();
    let mut no_version = VersionGroup::new(Category::NoVersion, None, None);
    let mut done = VersionGroup::new(Category::Done, None, None);
    let mut discarded = VersionGroup::new(Category::Discarded, None, None);

    for task in tasks {
        if status_contains_any(&task.status, DONE_SYNONYMS) {
            done.tasks.push(task.clone());
        } else if status_contains_any(&task.status, DISCARDED_SYNONYMS) {
            discarded.tasks.push(task.clone());
        } else {
            // Only the first version association decides; ties among
            // multiple versions break by list order.
            match task.versions.first() {
                None => no_version.tasks.push(task.clone()),
                Some(v) if v.released => {
                    group_for(&mut released, Category::Released, Some(&v.name), v.release_date)
                        .tasks
                        .push(task.clone());
                }
                Some(v) => {
                    group_for(
                        &mut unreleased,
                        Category::Unreleased,
                        Some(&v.name),
                        v.release_date,
                    )
                    .tasks
                    .push(task.clone());
                }
            }
        }
    }

    unreleased.sort_by(unreleased_order);
    released.sort_by(released_order);

    if !no_version.tasks.is_empty() {
        released.push(no_version);
    }

    let mut terminal = Vec::new();
    if !done.tasks.is_empty() {
        terminal.push(done);
    }
    if !discarded.tasks.is_empty() {
        terminal.push(discarded);
    }

    let mut out = Vec::new();
    if !unreleased.is_empty() {
        out.push(MainGroup {
            kind: MainGroupKind::UnreleasedVersions,
            groups: unreleased,
        });
    }
    if !released.is_empty() {
        out.push(MainGroup {
            kind: MainGroupKind::ReleasedVersions,
            groups: released,
        });
    }
    if !terminal.is_empty() {
        out.push(MainGroup {
            kind: MainGroupKind::DoneAndDiscarded,
            groups: terminal,
        });
    }
    out
}
