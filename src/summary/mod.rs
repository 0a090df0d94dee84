//! Summary aggregation over merged diff entries.
//!
//! Counts roll up globally and per resolved category. Parameter buckets
//! hold *distinct names*: the same parameter changing on fifty elements
//! counts once. Movement and existence buckets count elements.

pub mod read;

pub use read::read_summary_csv;

use crate::diff::{Change, DiffEntry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Column order of the per-category summary CSV.
pub const SUMMARY_COLUMNS: [&str; 17] = [
    "category",
    "xy_move_count",
    "z_move_count",
    "new_param_count",
    "new_param_list",
    "del_param_count",
    "del_param_list",
    "param_value_change_count",
    "param_value_change_list",
    "new_type_param_count",
    "new_type_param_list",
    "del_type_param_count",
    "del_type_param_list",
    "type_param_value_change_count",
    "type_param_value_change_list",
    "new_elem_count",
    "del_elem_count",
];

/// Separator for name lists inside one CSV cell.
pub const NAME_LIST_SEPARATOR: &str = "; ";

/// Counts and deduplicated name sets for every change kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeTally {
    pub xy_move_count: usize,
    pub z_move_count: usize,
    pub new_param_names: BTreeSet<String>,
    pub del_param_names: BTreeSet<String>,
    pub param_value_change_names: BTreeSet<String>,
    pub new_type_param_names: BTreeSet<String>,
    pub del_type_param_names: BTreeSet<String>,
    pub type_param_value_change_names: BTreeSet<String>,
    pub new_elem_count: usize,
    pub del_elem_count: usize,
}

impl ChangeTally {
    pub fn record(&mut self, change: &Change) {
        match change {
            Change::XyMove { .. } => self.xy_move_count += 1,
            Change::ZMove { .. } => self.z_move_count += 1,
            Change::ParamAdded(name) => {
                self.new_param_names.insert(name.clone());
            }
            Change::ParamDeleted(name) => {
                self.del_param_names.insert(name.clone());
            }
            Change::ParamChanged { name, .. } => {
                self.param_value_change_names.insert(name.clone());
            }
            Change::TypeParamAdded(name) => {
                self.new_type_param_names.insert(name.clone());
            }
            Change::TypeParamDeleted(name) => {
                self.del_type_param_names.insert(name.clone());
            }
            Change::TypeParamChanged { name, .. } => {
                self.type_param_value_change_names.insert(name.clone());
            }
            Change::ElementAdded => self.new_elem_count += 1,
            Change::ElementDeleted => self.del_elem_count += 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == ChangeTally::default()
    }
}

/// Per-category aggregate, one row of the summary CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    #[serde(flatten)]
    pub tally: ChangeTally,
}

/// Rolls all entries into one global tally.
#[must_use]
pub fn tally(entries: &[DiffEntry]) -> ChangeTally {
    let mut total = ChangeTally::default();
    for entry in entries {
        for change in &entry.changes {
            total.record(change);
        }
    }
    total
}

/// Rolls entries into per-category tallies, sorted by category name.
#[must_use]
pub fn tally_by_category(entries: &[DiffEntry]) -> Vec<CategorySummary> {
    let mut by_category: BTreeMap<String, ChangeTally> = BTreeMap::new();
    for entry in entries {
        let bucket = by_category
            .entry(entry.resolved_category().to_string())
            .or_default();
        for change in &entry.changes {
            bucket.record(change);
        }
    }

    by_category
        .into_iter()
        .map(|(category, tally)| CategorySummary { category, tally })
        .collect()
}

/// Renders the numbered terminal report the workflow prints after a run.
#[must_use]
pub fn render_report(total: &ChangeTally, categories: &[CategorySummary]) -> String {
    let mut out = String::new();
    out.push_str("--- Model Comparison Summary ---\n");
    render_tally(&mut out, total, "");

    if !categories.is_empty() {
        out.push_str("\n--- Model Comparison Summary by Category ---\n");
        for summary in categories {
            let _ = writeln!(out, "\nCategory: {}", summary.category);
            render_tally(&mut out, &summary.tally, "  ");
        }
    }
    out
}

fn render_tally(out: &mut String, tally: &ChangeTally, indent: &str) {
    let _ = writeln!(
        out,
        "{indent}1. Number of XY coordination move: {}",
        tally.xy_move_count
    );
    let _ = writeln!(
        out,
        "{indent}2. Number of Z coordination move: {}",
        tally.z_move_count
    );
    render_names(out, indent, 3, "new parameter added", &tally.new_param_names);
    render_names(out, indent, 4, "parameter deleted", &tally.del_param_names);
    render_names(
        out,
        indent,
        5,
        "parameter value change",
        &tally.param_value_change_names,
    );
    render_names(
        out,
        indent,
        6,
        "new type parameter added",
        &tally.new_type_param_names,
    );
    render_names(
        out,
        indent,
        7,
        "type parameter deleted",
        &tally.del_type_param_names,
    );
    render_names(
        out,
        indent,
        8,
        "type parameter value change",
        &tally.type_param_value_change_names,
    );
    let _ = writeln!(
        out,
        "{indent}9. Number of new element added: {}",
        tally.new_elem_count
    );
    let _ = writeln!(
        out,
        "{indent}10. Number of element deleted: {}",
        tally.del_elem_count
    );
}

fn render_names(out: &mut String, indent: &str, n: usize, label: &str, names: &BTreeSet<String>) {
    let _ = writeln!(out, "{indent}{n}. Number of {label}: {}", names.len());
    for name in names {
        let _ = writeln!(out, "{indent}   - {name}");
    }
}
