use crate::diff::DiffEntry;
use crate::error::ExportError;
use crate::model::Snapshot;
use crate::summary::{CategorySummary, NAME_LIST_SEPARATOR, SUMMARY_COLUMNS};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Header of the merged diff CSV.
pub const DIFF_COLUMNS: [&str; 8] = [
    "previous_element_id",
    "current_element_id",
    "previous_family_and_type",
    "current_family_and_type",
    "previous_category",
    "current_category",
    "compare_result",
    "compare_date",
];

/// Header of the source-resolution CSV.
pub const SOURCES_COLUMNS: [&str; 6] = [
    "part_element_id",
    "part_family_and_type",
    "part_category",
    "source_element_id",
    "source_family_and_type",
    "source_category",
];

fn writer_for<P: AsRef<Path>>(path: P) -> Result<csv::Writer<File>, ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    Ok(csv::Writer::from_writer(file))
}

fn flush(mut writer: csv::Writer<File>) -> Result<(), ExportError> {
    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })
}

/// Writes one row per merged diff entry.
pub fn export_diff_csv<P: AsRef<Path>>(entries: &[DiffEntry], path: P) -> Result<(), ExportError> {
    let mut writer = writer_for(path)?;
    writer.write_record(DIFF_COLUMNS)?;

    for entry in entries {
        writer.write_record([
            entry.previous_id.map(|id| id.to_string()).unwrap_or_default(),
            entry.current_id.map(|id| id.to_string()).unwrap_or_default(),
            entry.previous_family_and_type.clone(),
            entry.current_family_and_type.clone(),
            entry.previous_category.clone(),
            entry.current_category.clone(),
            entry.description(),
            entry.compare_date.clone(),
        ])?;
    }

    flush(writer)
}

fn join_names(names: &BTreeSet<String>) -> String {
    names
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(NAME_LIST_SEPARATOR)
}

/// Writes one row per category with counts and deduplicated name lists.
pub fn export_summary_csv<P: AsRef<Path>>(
    categories: &[CategorySummary],
    path: P,
) -> Result<(), ExportError> {
    let mut writer = writer_for(path)?;
    writer.write_record(SUMMARY_COLUMNS)?;

    for summary in categories {
        let tally = &summary.tally;
        writer.write_record([
            summary.category.clone(),
            tally.xy_move_count.to_string(),
            tally.z_move_count.to_string(),
            tally.new_param_names.len().to_string(),
            join_names(&tally.new_param_names),
            tally.del_param_names.len().to_string(),
            join_names(&tally.del_param_names),
            tally.param_value_change_names.len().to_string(),
            join_names(&tally.param_value_change_names),
            tally.new_type_param_names.len().to_string(),
            join_names(&tally.new_type_param_names),
            tally.del_type_param_names.len().to_string(),
            join_names(&tally.del_type_param_names),
            tally.type_param_value_change_names.len().to_string(),
            join_names(&tally.type_param_value_change_names),
            tally.new_elem_count.to_string(),
            tally.del_elem_count.to_string(),
        ])?;
    }

    flush(writer)
}

/// Writes one row per intermediate element of `snapshot`, mapping it to
/// its terminal source element. Unresolvable chains (cycles, dangling
/// links) leave the source columns empty.
pub fn export_sources_csv<P: AsRef<Path>>(
    snapshot: &Snapshot,
    path: P,
) -> Result<(), ExportError> {
    let mut writer = writer_for(path)?;
    writer.write_record(SOURCES_COLUMNS)?;

    for (&id, record) in &snapshot.elements {
        if record.source_id.is_none() {
            continue;
        }
        let source = snapshot.resolve_source(id);
        let source_record = source.and_then(|sid| snapshot.get(sid));
        writer.write_record([
            id.to_string(),
            record.family_and_type.clone(),
            record.category.clone(),
            source.map(|sid| sid.to_string()).unwrap_or_default(),
            source_record
                .map(|r| r.family_and_type.clone())
                .unwrap_or_default(),
            source_record.map(|r| r.category.clone()).unwrap_or_default(),
        ])?;
    }

    flush(writer)
}
