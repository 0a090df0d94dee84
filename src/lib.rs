//! # BIM Diff
//!
//! Compares two snapshots of a building model and reports per-element
//! changes: movement, instance/type parameter diffs, and added or deleted
//! elements.
//!
//! Snapshots are JSON files produced by an external extractor running
//! inside the host CAD application; this crate starts where the extractor
//! stops and ends at CSV/JSON reports.
//!
//! ## Example
//!
//! ```no_run
//! use bim_diff::diff::{compare_snapshots, Analysis};
//! use bim_diff::model::Snapshot;
//!
//! let previous = Snapshot::load("previous.json").expect("Failed to load");
//! let current = Snapshot::load("current.json").expect("Failed to load");
//! let entries = compare_snapshots(&previous, &current, Analysis::ALL, "2026-08-29 10:00:00");
//! for entry in &entries {
//!     println!("{}", entry.description());
//! }
//! ```

pub mod diff;
pub mod error;
pub mod export;
pub mod model;
pub mod summary;
pub mod ui;
