use crate::model::ElementId;
use serde::{Serialize, Serializer};
use std::fmt;

/// Direction of a vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Upward,
    Downward,
}

/// One change phrase for one element.
///
/// `Display` renders the exact wire phrase the diff CSV carries; entries
/// join their phrases with `", "` into the `compare_result` column.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Planar movement, millimetres rounded to the nearest integer.
    XyMove { mm: i64 },
    /// Vertical movement with direction, millimetres.
    ZMove { mm: i64, direction: Vertical },
    ParamAdded(String),
    ParamDeleted(String),
    ParamChanged {
        name: String,
        previous: String,
        current: String,
    },
    TypeParamAdded(String),
    TypeParamDeleted(String),
    TypeParamChanged {
        name: String,
        previous: String,
        current: String,
    },
    ElementAdded,
    ElementDeleted,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::XyMove { mm } => write!(f, "XY coordination move + {mm}mm"),
            Change::ZMove { mm, direction } => {
                let dir = match direction {
                    Vertical::Upward => "upward",
                    Vertical::Downward => "downward",
                };
                write!(f, "Z coordination move {dir} + {mm}mm")
            }
            Change::ParamAdded(name) => write!(f, "new parameter added: {name}"),
            Change::ParamDeleted(name) => write!(f, "parameter deleted: {name}"),
            Change::ParamChanged {
                name,
                previous,
                current,
            } => write!(f, "parameter value changed: {name} ({previous} → {current})"),
            Change::TypeParamAdded(name) => write!(f, "new type parameter added: {name}"),
            Change::TypeParamDeleted(name) => write!(f, "type parameter deleted: {name}"),
            Change::TypeParamChanged {
                name,
                previous,
                current,
            } => write!(
                f,
                "type parameter value changed: {name} ({previous} → {current})"
            ),
            Change::ElementAdded => f.write_str("element added"),
            Change::ElementDeleted => f.write_str("element deleted"),
        }
    }
}

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One merged change record for a single element across two snapshots.
///
/// At least one of `previous_id`/`current_id` is always set - the merger
/// groups partial entries by whichever id is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffEntry {
    #[serde(rename = "previous_element_id")]
    pub previous_id: Option<ElementId>,
    #[serde(rename = "current_element_id")]
    pub current_id: Option<ElementId>,
    pub previous_family_and_type: String,
    pub current_family_and_type: String,
    pub previous_category: String,
    pub current_category: String,
    pub changes: Vec<Change>,
    #[serde(rename = "compare_date")]
    pub compare_date: String,
}

impl DiffEntry {
    /// The comma-joined `compare_result` text.
    #[must_use]
    pub fn description(&self) -> String {
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Category used for summary bucketing: current side first, falling
    /// back to the previous side, then `Unknown`.
    #[must_use]
    pub fn resolved_category(&self) -> &str {
        if !self.current_category.is_empty() {
            &self.current_category
        } else if !self.previous_category.is_empty() {
            &self.previous_category
        } else {
            "Unknown"
        }
    }
}
