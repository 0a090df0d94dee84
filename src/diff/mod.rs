//! The model diff engine: three comparators and a merger.
//!
//! Each comparator takes two immutable [`Snapshot`]s and yields partial
//! [`DiffEntry`] records; [`compare_snapshots`] runs the selected
//! comparators in a fixed order and merges their output into one record
//! per element.

pub mod change;
pub mod existence;
pub mod merge;
pub mod params;
pub mod position;

pub use change::{Change, DiffEntry, Vertical};

use crate::model::Snapshot;

/// Which comparators a run executes, mirroring the analysis-item
/// selection in front of the comparison workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub position: bool,
    pub parameters: bool,
    pub existence: bool,
}

impl Analysis {
    pub const ALL: Analysis = Analysis {
        position: true,
        parameters: true,
        existence: true,
    };

    #[must_use]
    pub fn any(self) -> bool {
        self.position || self.parameters || self.existence
    }
}

/// Runs the selected comparators over two snapshots and merges the
/// results.
///
/// Partial entries are fed to the merger in comparator order (position,
/// parameters, existence), which fixes the phrase order inside each
/// merged entry. `compare_date` stamps every merged record.
#[must_use]
pub fn compare_snapshots(
    previous: &Snapshot,
    current: &Snapshot,
    analysis: Analysis,
    compare_date: &str,
) -> Vec<DiffEntry> {
    let mut partials = Vec::new();
    if analysis.position {
        partials.extend(position::compare(previous, current));
    }
    if analysis.parameters {
        partials.extend(params::compare(previous, current));
    }
    if analysis.existence {
        partials.extend(existence::compare(previous, current));
    }
    merge::merge_partials(partials, compare_date)
}
