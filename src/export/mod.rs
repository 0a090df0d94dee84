pub mod csv;
pub mod json;

pub use crate::error::ExportError;
pub use csv::{export_diff_csv, export_sources_csv, export_summary_csv};
pub use json::{export_json, DiffReport};
