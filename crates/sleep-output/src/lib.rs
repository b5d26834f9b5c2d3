//! Export of flat sleep diary records to CSV and JSON files.

pub mod csv;
pub mod error;
pub mod format;
pub mod json;

use std::path::Path;

use sleep_model::FlatRecord;

pub use crate::csv::{cell_text, column_union, export_csv, write_csv};
pub use crate::error::{OutputError, Result};
pub use crate::format::{ExportFormat, default_file_name};
pub use crate::json::{export_json, write_json};

/// Write `records` to `path` in `format`.
pub fn export_records(records: &[FlatRecord], format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => export_csv(records, path),
        ExportFormat::Json => export_json(records, path),
    }
}
