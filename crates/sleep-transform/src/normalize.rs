//! Normalization of diary days into flat records.

use serde_json::Value;
use sleep_model::record::{ANSWERS_KEY, COMMENTS_KEY};
use sleep_model::{DiaryDay, FlatRecord, SessionMetadata, tagged_value, value_kind};
use tracing::warn;

use crate::answers::map_answers;

/// Merge session metadata and mapped answers into one flat record.
///
/// Session metadata overwrites same-named day fields. The raw `answers`
/// sequence is replaced by its mapped fields, and a tagged `comments` value
/// is unwrapped.
#[must_use]
pub fn normalize_day(day: DiaryDay, meta: &SessionMetadata) -> FlatRecord {
    let mut record = day.into_fields();

    for (key, value) in meta.entries() {
        record.insert(key.to_string(), value.clone());
    }

    match record.remove(ANSWERS_KEY) {
        Some(Value::Array(answers)) => record.extend(map_answers(&answers)),
        Some(other) => {
            warn!(
                kind = value_kind(&other),
                "answers field is not a sequence, leaving it unmapped"
            );
            record.insert(ANSWERS_KEY.to_string(), other);
        }
        None => {}
    }

    unwrap_comments(&mut record);
    record
}

/// Replace a tagged `comments` value with its inner value.
pub fn unwrap_comments(record: &mut FlatRecord) {
    if let Some(comments) = record.get_mut(COMMENTS_KEY)
        && let Some(inner) = tagged_value(comments).cloned()
    {
        *comments = inner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> SessionMetadata {
        SessionMetadata {
            uid: json!("session-1"),
            user_id: json!("user-9"),
            started_at: json!("2025-01-01T00:00:00Z"),
            created_at: json!("2025-01-01T00:00:00Z"),
            updated_at: json!("2025-01-06T00:00:00Z"),
        }
    }

    #[test]
    fn merges_metadata_answers_and_comments() {
        let day = DiaryDay::from_value(json!({
            "date": "Jan 5",
            "date_unix": 1736035200,
            "complete": true,
            "comments": {"v": "restless"},
            "answers": [{"v": "22:30"}, {"v": "23:00"}],
        }))
        .unwrap();

        let record = normalize_day(day, &meta());

        assert!(!record.contains_key("answers"));
        assert_eq!(record["time_got_into_bed"], json!("22:30"));
        assert_eq!(record["time_tried_to_sleep"], json!("23:00"));
        assert_eq!(record["comments"], json!("restless"));
        assert_eq!(record["userId"], json!("user-9"));
        assert_eq!(record["updatedAt"], json!("2025-01-06T00:00:00Z"));
        assert_eq!(record["date"], json!("Jan 5"));
    }

    #[test]
    fn session_uid_overrides_day_uid() {
        let day = DiaryDay::from_value(json!({"uid": "day-uid"})).unwrap();
        let record = normalize_day(day, &meta());
        assert_eq!(record["uid"], json!("session-1"));
    }

    #[test]
    fn untagged_comments_are_left_alone() {
        let day = DiaryDay::from_value(json!({"comments": "plain"})).unwrap();
        assert_eq!(normalize_day(day, &meta())["comments"], json!("plain"));

        let day = DiaryDay::from_value(json!({"comments": {"text": "x"}})).unwrap();
        assert_eq!(
            normalize_day(day, &meta())["comments"],
            json!({"text": "x"})
        );
    }

    #[test]
    fn non_sequence_answers_are_kept() {
        let day = DiaryDay::from_value(json!({"answers": "n/a"})).unwrap();
        let record = normalize_day(day, &meta());
        assert_eq!(record["answers"], json!("n/a"));
    }

    #[test]
    fn day_without_answers_gets_metadata_only() {
        let day = DiaryDay::from_value(json!({"date": "Feb 2"})).unwrap();
        let record = normalize_day(day, &meta());
        assert_eq!(record.len(), 6);
    }
}
