use serde::{Deserialize, Serialize};
use std::fmt;

/// One parameter value as captured by the snapshot extractor.
///
/// Host parameters are loosely typed (text, integer, length, element
/// reference, or unset), so the snapshot carries a tagged variant and all
/// diffing compares the normalized display form via [`ParamValue::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Reference {
        #[serde(rename = "ref")]
        id: i64,
    },
    Null,
}

impl ParamValue {
    /// Display-string form used for equality and for change phrases.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.to_string()
    }

    /// Whether two values are equal after normalization.
    ///
    /// `Integer(3)` and `Real(3.0)` normalize to the same string and
    /// compare equal, matching how the host displays them.
    #[must_use]
    pub fn same_as(&self, other: &ParamValue) -> bool {
        self.normalized() == other.normalized()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Real(v) => write!(f, "{v}"),
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Reference { id } => write!(f, "#{id}"),
            ParamValue::Null => f.write_str("-"),
        }
    }
}
