//! End-to-end tests: raw diary day to flat export record and typed record.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};
use sleep_model::{DiaryDay, SessionMetadata};
use sleep_transform::{TransformContext, flatten, normalize_day, transform_record};

fn session() -> SessionMetadata {
    let envelope = json!({
        "uid": "session-7",
        "userId": "consensus-user",
        "startedAt": "2024-12-01T08:00:00Z",
        "createdAt": "2024-12-01T08:00:00Z",
        "updatedAt": "2025-01-02T07:10:00Z",
    });
    SessionMetadata::from_envelope(envelope.as_object().unwrap())
}

fn raw_day() -> Value {
    json!({
        "date": "Dec 31",
        "date_unix": 1735603200,
        "complete": true,
        "comments": {"v": "woke up early"},
        "extra": {"device": {"os": "ios"}},
        "answers": [
            {"v": "22:30"},
            {"v": "23:00"},
            {"v": "20"},
            {"v": "0"},
            {"v": "15"},
            [{"v": "6:05"}, {"v": "25"}],
            {"v": "6:30"},
            {"v": "Good"},
            {"v": "None"},
            {"v": "Coffee"},
            {"v": null},
            {"v": null},
            {"v": "Busy day"},
            {"v": "ignored"},
        ],
    })
}

#[test]
fn export_record_is_flat_and_complete() {
    let day = DiaryDay::from_value(raw_day()).unwrap();
    let record = flatten(&normalize_day(day, &session()));

    assert_eq!(record["extra_device_os"], json!("ios"));
    assert_eq!(record["comments"], json!("woke up early"));
    assert_eq!(record["final_awakening_time"], json!("6:05"));
    assert_eq!(record["time_in_bed_after_final_awakening_mins"], json!("25"));
    assert_eq!(
        record["final_awakening_details"],
        json!(r#"[{"v": "6:05"}, {"v": "25"}]"#)
    );
    assert_eq!(record["additional_notes"], json!("Busy day"));
    assert_eq!(record["uid"], json!("session-7"));
    assert!(!record.contains_key("answers"));
    assert!(!record.values().any(|value| value == &json!("ignored")));
}

#[test]
fn storage_record_is_typed() {
    let day = DiaryDay::from_value(raw_day()).unwrap();
    let record = normalize_day(day, &session());
    let ctx = TransformContext::new("user-1")
        .with_reference_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());

    let typed = transform_record(&record, &ctx).unwrap();

    assert_eq!(typed.date, NaiveDate::from_ymd_opt(2024, 12, 31));
    assert_eq!(typed.time_got_into_bed, NaiveTime::from_hms_opt(22, 30, 0));
    assert_eq!(typed.final_awakening_time, NaiveTime::from_hms_opt(6, 5, 0));
    assert_eq!(typed.time_to_fall_asleep_mins, Some(20));
    assert_eq!(typed.times_woke_up_count, Some(0));
    assert_eq!(typed.time_in_bed_after_final_awakening_mins, Some(25));
    assert_eq!(typed.uid, json!("session-7"));
    assert_eq!(typed.comments, json!("woke up early"));

    let stored = serde_json::to_value(&typed).unwrap();
    assert_eq!(stored["final_awakening_time"], json!("06:05:00"));
    assert_eq!(stored["date"], json!("2024-12-31"));
}
