use crate::diff::DiffEntry;
use crate::error::ExportError;
use crate::summary::{CategorySummary, ChangeTally};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Everything one comparison run produced, for machine consumers.
#[derive(Debug, Serialize)]
pub struct DiffReport<'a> {
    pub previous_document: &'a str,
    pub current_document: &'a str,
    pub compare_date: &'a str,
    pub entries: &'a [DiffEntry],
    pub summary: &'a ChangeTally,
    pub categories: &'a [CategorySummary],
}

/// Writes the full report as pretty-printed JSON.
pub fn export_json<P: AsRef<Path>>(report: &DiffReport<'_>, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Change;
    use crate::model::ElementId;

    #[test]
    fn entries_serialize_changes_as_phrases() {
        let entries = vec![DiffEntry {
            previous_id: Some(ElementId(5)),
            current_id: Some(ElementId(5)),
            changes: vec![Change::XyMove { mm: 42 }],
            compare_date: "2026-08-29 10:00:00".to_string(),
            ..DiffEntry::default()
        }];
        let report = DiffReport {
            previous_document: "a.rvt",
            current_document: "b.rvt",
            compare_date: "2026-08-29 10:00:00",
            entries: &entries,
            summary: &ChangeTally::default(),
            categories: &[],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entries"][0]["previous_element_id"], 5);
        assert_eq!(json["entries"][0]["changes"][0], "XY coordination move + 42mm");
    }
}
