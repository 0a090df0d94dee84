use super::{CategorySummary, ChangeTally, NAME_LIST_SEPARATOR};
use crate::error::LoadError;
use csv::StringRecord;
use std::collections::BTreeSet;
use std::path::Path;

/// Reads a per-category summary CSV back into [`CategorySummary`] rows.
///
/// This is the entry point for downstream tooling that builds visual
/// filters from an earlier run. Name lists are re-split into sets, so
/// distinct-name counts survive a write/read round trip.
///
/// # Errors
///
/// Returns [`LoadError::FileRead`] if the file cannot be opened,
/// [`LoadError::CsvRead`] on malformed CSV and
/// [`LoadError::InvalidColumn`] when an expected column is missing or a
/// count fails to parse.
pub fn read_summary_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CategorySummary>, LoadError> {
    let file = std::fs::File::open(&path).map_err(|source| LoadError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(parse_row(&headers, &record)?);
    }
    Ok(rows)
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<CategorySummary, LoadError> {
    let cell = |column: &str| -> Result<&str, LoadError> {
        headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| record.get(idx))
            .ok_or_else(|| LoadError::InvalidColumn {
                column: column.to_string(),
                message: "column missing".to_string(),
            })
    };
    let count = |column: &str| -> Result<usize, LoadError> {
        cell(column)?
            .trim()
            .parse()
            .map_err(|e| LoadError::InvalidColumn {
                column: column.to_string(),
                message: format!("not a count: {e}"),
            })
    };
    let names = |column: &str| -> Result<BTreeSet<String>, LoadError> {
        Ok(cell(column)?
            .split(NAME_LIST_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string)
            .collect())
    };

    Ok(CategorySummary {
        category: cell("category")?.to_string(),
        tally: ChangeTally {
            xy_move_count: count("xy_move_count")?,
            z_move_count: count("z_move_count")?,
            new_param_names: names("new_param_list")?,
            del_param_names: names("del_param_list")?,
            param_value_change_names: names("param_value_change_list")?,
            new_type_param_names: names("new_type_param_list")?,
            del_type_param_names: names("del_type_param_list")?,
            type_param_value_change_names: names("type_param_value_change_list")?,
            new_elem_count: count("new_elem_count")?,
            del_elem_count: count("del_elem_count")?,
        },
    })
}
