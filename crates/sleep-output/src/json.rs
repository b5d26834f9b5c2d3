//! JSON export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{OutputError, Result};

/// Write `records` as a pretty-printed JSON array followed by a newline.
///
/// Non-ASCII text is written as-is.
pub fn write_json<T: Serialize, W: Write>(records: &[T], mut writer: W) -> Result<()> {
    if records.is_empty() {
        return Err(OutputError::EmptyRecords);
    }
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(records = records.len(), "json written");
    Ok(())
}

/// Write `records` to a new JSON file at `path`.
pub fn export_json<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    if records.is_empty() {
        return Err(OutputError::EmptyRecords);
    }
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_json(records, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn pretty_prints_with_two_space_indent() {
        let mut out = Vec::new();
        write_json(&[json!({"a": 1})], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n  {\n    \"a\": 1\n  }\n]\n");
    }

    #[test]
    fn keeps_non_ascii_verbatim() {
        let mut out = Vec::new();
        write_json(&[json!({"comments": "dormí bien ☾"})], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("dormí bien ☾"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let records: Vec<Value> = Vec::new();
        assert!(matches!(
            write_json(&records, Vec::new()),
            Err(OutputError::EmptyRecords)
        ));
    }
}
