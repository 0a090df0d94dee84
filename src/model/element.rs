use super::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable element identifier scoped to one document snapshot.
///
/// Only equality of the raw integer is meaningful across documents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// World-coordinate location in internal length units (feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Everything the extractor captured about one element.
///
/// All fields are defaulted so a partially extracted element (no location,
/// no readable parameters) still deserializes and simply contributes
/// nothing to the comparators that need the missing data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementRecord {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub family_and_type: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
    #[serde(default)]
    pub type_parameters: BTreeMap<String, ParamValue>,
    /// Owning-entity link for intermediate elements (e.g. a part cut from
    /// a wall points at the wall). Terminal elements carry no link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<ElementId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_deserializes_with_missing_fields() {
        let record: ElementRecord = serde_json::from_str(r#"{"category":"Walls"}"#).unwrap();
        assert_eq!(record.category, "Walls");
        assert_eq!(record.family_and_type, "");
        assert_eq!(record.position, None);
        assert!(record.parameters.is_empty());
        assert!(record.type_parameters.is_empty());
        assert_eq!(record.source_id, None);
    }
}
