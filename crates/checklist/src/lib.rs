#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Per-task checklist documents for taskdeck.
//!
//! Each tracked task gets one standardized checklist, stored as a JSON
//! file under `.taskdeck/checklists/`. This crate provides:
//! - [`Checklist`] / [`ChecklistItem`]: the document model with per-item
//!   state and free-text notes.
//! - [`ChecklistStore`]: one-file-per-task JSON persistence,
//!   last-write-wins.
//! - [`export_markdown`]: static-document export.

pub mod entities;
pub mod error;
pub mod export;
pub mod storage;

pub use entities::{Checklist, ChecklistItem, ItemState};
pub use error::ChecklistError;
pub use export::export_markdown;
pub use storage::ChecklistStore;
