//! Interpretation of API payloads as diary records.
//!
//! The expected shape is `{"data": {"jsonData": "<json text>", "uid", ...}}`
//! where the decoded text holds `{"days": [...]}`. Anything else degrades to
//! the closest sensible reading instead of failing.

use std::fmt;

use serde_json::{Map, Value};
use sleep_model::{DiaryDay, SessionMetadata, value_kind};
use sleep_transform::normalize_day;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

const DATA_KEY: &str = "data";
const JSON_DATA_KEY: &str = "jsonData";
const DAYS_KEY: &str = "days";

/// How a payload was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A session with embedded diary days; days were normalized.
    Session,
    /// Embedded session data without a `days` list, used as one record.
    EmbeddedRecord,
    /// A `data` envelope without embedded session data, used as one record.
    Envelope,
    /// A list of records, used as-is.
    List,
    /// Any other value, used as one record.
    Single,
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Session => "session",
            Self::EmbeddedRecord => "embedded record",
            Self::Envelope => "envelope",
            Self::List => "record list",
            Self::Single => "single record",
        };
        f.write_str(label)
    }
}

/// Records recovered from a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecords {
    pub shape: PayloadShape,
    pub records: Vec<Map<String, Value>>,
    /// Entries dropped because they were not JSON objects.
    pub skipped: usize,
}

/// Extract diary records from an API payload.
///
/// Session days are normalized with the session metadata. An empty result is
/// reported as [`IngestError::NoRecords`].
pub fn extract_records(payload: Value) -> Result<ExtractedRecords> {
    let (shape, candidates) = match payload {
        Value::Object(mut root) if root.contains_key(DATA_KEY) => match root.remove(DATA_KEY) {
            Some(Value::Object(envelope)) => return extract_envelope(envelope),
            Some(Value::Array(items)) => (PayloadShape::List, items),
            Some(other) => (PayloadShape::Envelope, vec![other]),
            None => (PayloadShape::Envelope, Vec::new()),
        },
        Value::Array(items) => (PayloadShape::List, items),
        other => (PayloadShape::Single, vec![other]),
    };
    collect_objects(shape, candidates)
}

fn extract_envelope(envelope: Map<String, Value>) -> Result<ExtractedRecords> {
    let decoded = match envelope.get(JSON_DATA_KEY) {
        None => return collect_objects(PayloadShape::Envelope, vec![Value::Object(envelope)]),
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|source| IngestError::EmbeddedJson { source })?,
        Some(embedded) => embedded.clone(),
    };

    let mut session = match decoded {
        Value::Object(session) => session,
        other => return collect_objects(PayloadShape::EmbeddedRecord, vec![other]),
    };

    let days = match session.remove(DAYS_KEY) {
        Some(Value::Array(days)) => days,
        Some(other) => {
            warn!(
                kind = value_kind(&other),
                "session days are not a list, using session data as one record"
            );
            session.insert(DAYS_KEY.to_string(), other);
            return collect_objects(PayloadShape::EmbeddedRecord, vec![Value::Object(session)]);
        }
        None => {
            return collect_objects(PayloadShape::EmbeddedRecord, vec![Value::Object(session)]);
        }
    };

    let meta = SessionMetadata::from_envelope(&envelope);
    let mut records = Vec::with_capacity(days.len());
    let mut skipped = 0;
    for (index, raw) in days.into_iter().enumerate() {
        match DiaryDay::from_value(raw) {
            Ok(day) => records.push(normalize_day(day, &meta)),
            Err(error) => {
                warn!(index, %error, "skipping diary day");
                skipped += 1;
            }
        }
    }
    finish(PayloadShape::Session, records, skipped)
}

fn collect_objects(shape: PayloadShape, candidates: Vec<Value>) -> Result<ExtractedRecords> {
    let mut records = Vec::with_capacity(candidates.len());
    let mut skipped = 0;
    for (index, candidate) in candidates.into_iter().enumerate() {
        match candidate {
            Value::Object(record) => records.push(record),
            other => {
                warn!(index, kind = value_kind(&other), "skipping non-object record");
                skipped += 1;
            }
        }
    }
    finish(shape, records, skipped)
}

fn finish(
    shape: PayloadShape,
    records: Vec<Map<String, Value>>,
    skipped: usize,
) -> Result<ExtractedRecords> {
    if records.is_empty() {
        return Err(IngestError::NoRecords);
    }
    debug!(%shape, records = records.len(), skipped, "payload interpreted");
    Ok(ExtractedRecords {
        shape,
        records,
        skipped,
    })
}
