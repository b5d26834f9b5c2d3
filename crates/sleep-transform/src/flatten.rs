//! Flattening of nested records into single-level key/value pairs.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};
use sleep_model::FlatRecord;

/// Separator joining nested key paths.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flatten `record` with `_`-joined key paths.
///
/// Nested objects are expanded into compound keys. Arrays are never split
/// into columns; they are stored as single-line JSON text.
#[must_use]
pub fn flatten(record: &Map<String, Value>) -> FlatRecord {
    flatten_with(record, "", DEFAULT_SEPARATOR)
}

/// Flatten `record`, prefixing every key path with `prefix` (when non-empty).
#[must_use]
pub fn flatten_with(record: &Map<String, Value>, prefix: &str, separator: &str) -> FlatRecord {
    let mut flat = FlatRecord::new();
    flatten_into(record, prefix, separator, &mut flat);
    flat
}

fn flatten_into(record: &Map<String, Value>, prefix: &str, separator: &str, out: &mut FlatRecord) {
    for (key, value) in record {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &path, separator, out),
            Value::Array(_) => {
                out.insert(path, Value::String(encode_sequence(value)));
            }
            scalar => {
                out.insert(path, scalar.clone());
            }
        }
    }
}

/// Text encoding of a sequence value: single-line JSON with `, ` and `: `
/// separators. Non-ASCII text is kept as-is.
#[must_use]
pub fn encode_sequence(value: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Single-line formatter with a space after every separator.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}
