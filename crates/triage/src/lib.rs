#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Task triage for taskdeck.
//!
//! Two pieces:
//! - [`categorize`]: pure categorization of assigned tasks into an
//!   ordered tree of main groups and version groups for display.
//! - [`AssignmentWatcher`]: a polling loop that diffs fetched task ids
//!   against the set of previously observed ids and reports the delta
//!   as newly assigned tasks.
//!
//! Both consume the same [`tracker::TaskSource`] fetch seam.

pub mod categorize;
pub mod watcher;

pub use categorize::{categorize, Category, MainGroup, MainGroupKind, VersionGroup};
pub use watcher::{AssignmentWatcher, NewTasksCallback};
