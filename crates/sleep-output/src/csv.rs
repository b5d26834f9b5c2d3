//! CSV export of flat records.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use sleep_model::FlatRecord;
use tracing::debug;

use crate::error::{OutputError, Result};

/// Sorted union of the keys of every record.
pub fn column_union(records: &[FlatRecord]) -> Vec<&str> {
    records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Text of a single CSV cell.
///
/// Null is blank, strings are written verbatim and everything else uses its
/// compact JSON text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Write `records` as CSV with a header row of the sorted key union.
///
/// Records missing a column get a blank cell.
pub fn write_csv<W: Write>(records: &[FlatRecord], writer: W) -> Result<()> {
    if records.is_empty() {
        return Err(OutputError::EmptyRecords);
    }

    let columns = column_union(records);
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(&columns)?;
    for record in records {
        csv.write_record(
            columns
                .iter()
                .map(|column| record.get(*column).map(cell_text).unwrap_or_default()),
        )?;
    }
    csv.flush()?;

    debug!(records = records.len(), columns = columns.len(), "csv written");
    Ok(())
}

/// Write `records` to a new CSV file at `path`.
pub fn export_csv(records: &[FlatRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Err(OutputError::EmptyRecords);
    }
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(records, file)
}
