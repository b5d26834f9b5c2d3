//! Diary day records and the session metadata attached to them.

use serde_json::{Map, Value};

use crate::error::{ModelError, Result, value_kind};

/// A single-level record: string keys to scalars or JSON text.
///
/// Backed by `serde_json::Map`, so keys iterate in sorted order.
pub type FlatRecord = Map<String, Value>;

/// Key holding the positional answers of a diary day.
pub const ANSWERS_KEY: &str = "answers";
/// Key holding the free-text comment of a diary day.
pub const COMMENTS_KEY: &str = "comments";
pub const DATE_KEY: &str = "date";
pub const DATE_UNIX_KEY: &str = "date_unix";
pub const UID_KEY: &str = "uid";
pub const COMPLETE_KEY: &str = "complete";

/// One day's diary entry, as received from the survey API.
///
/// Fields other than the well-known ones are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryDay {
    fields: Map<String, Value>,
}

impl DiaryDay {
    /// Build a diary day from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ModelError::NotAnObject {
                context: "diary day".to_string(),
                found: value_kind(&other),
            }),
        }
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// True only when the record's `complete` field is the boolean `true`.
pub fn is_complete(record: &Map<String, Value>) -> bool {
    matches!(record.get(COMPLETE_KEY), Some(Value::Bool(true)))
}

/// Session-level fields copied onto every day of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMetadata {
    pub uid: Value,
    pub user_id: Value,
    pub started_at: Value,
    pub created_at: Value,
    pub updated_at: Value,
}

impl SessionMetadata {
    /// Read metadata from the session envelope. Absent fields become null.
    pub fn from_envelope(envelope: &Map<String, Value>) -> Self {
        let field = |key: &str| envelope.get(key).cloned().unwrap_or(Value::Null);
        Self {
            uid: field("uid"),
            user_id: field("userId"),
            started_at: field("startedAt"),
            created_at: field("createdAt"),
            updated_at: field("updatedAt"),
        }
    }

    /// Field names and values, in the casing used by the API.
    pub fn entries(&self) -> [(&'static str, &Value); 5] {
        [
            ("uid", &self.uid),
            ("userId", &self.user_id),
            ("startedAt", &self.started_at),
            ("createdAt", &self.created_at),
            ("updatedAt", &self.updated_at),
        ]
    }
}
