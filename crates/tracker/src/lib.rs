#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Issue tracker client for taskdeck.
//!
//! This crate owns the HTTP boundary to the issue tracker:
//! - [`TrackerClient`]: REST client that fetches the current user's
//!   assigned tasks, paging through the search endpoint.
//! - [`Task`] / [`VersionRef`]: ingest-validated task shapes. Loosely
//!   shaped wire fields (missing status, malformed release dates) are
//!   defaulted here, at the boundary, so downstream code never sees them.
//! - [`TaskSource`]: the fetch seam consumed by the watcher and the CLI,
//!   so tests can substitute a scripted source for the real client.

pub mod client;
pub mod error;
pub mod models;

pub use client::{TaskSource, TrackerClient};
pub use error::FetchError;
pub use models::{Task, VersionRef};
