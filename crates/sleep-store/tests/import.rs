//! Integration tests for batched import against the in-memory store.

use chrono::{Days, NaiveDate};
use serde_json::{Value, json};
use sleep_model::{SLEEP_RECORDS_TABLE, SleepRecord};
use sleep_store::{
    DEFAULT_USER_EMAIL, ImportError, MemoryStore, RecordStore, StoreError, ensure_user,
    import_batches,
};

fn records(user_id: &str, count: u64, rating: &str) -> Vec<SleepRecord> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|offset| SleepRecord {
            user_id: user_id.to_string(),
            date: start.checked_add_days(Days::new(offset)),
            date_unix: json!(1_735_689_600 + offset * 86_400),
            uid: json!(format!("day-{offset}")),
            comments: Value::Null,
            time_got_into_bed: None,
            time_tried_to_sleep: None,
            time_to_fall_asleep_mins: Some(10),
            times_woke_up_count: Some(0),
            total_awake_time_mins: None,
            final_awakening_time: None,
            time_in_bed_after_final_awakening_mins: None,
            time_got_out_of_bed: None,
            sleep_quality_rating: json!(rating),
        })
        .collect()
}

#[test]
fn imports_in_batches_and_counts() {
    let store = MemoryStore::new();
    let user = ensure_user(&store, DEFAULT_USER_EMAIL, None).unwrap().user;

    let report = import_batches(&store, &records(user.id.as_str(), 120, "Good"), 50).unwrap();

    assert_eq!(report.batches, 3);
    assert_eq!(report.imported, 120);
    assert_eq!(store.count_for_user(SLEEP_RECORDS_TABLE, &user.id).unwrap(), 120);
}

#[test]
fn reimport_overwrites_instead_of_duplicating() {
    let store = MemoryStore::new();
    let user = ensure_user(&store, DEFAULT_USER_EMAIL, None).unwrap().user;

    import_batches(&store, &records(user.id.as_str(), 10, "Poor"), 4).unwrap();
    import_batches(&store, &records(user.id.as_str(), 10, "Good"), 4).unwrap();

    let rows = store.rows(SLEEP_RECORDS_TABLE);
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().all(|row| row.sleep_quality_rating == json!("Good")));
}

#[test]
fn failing_batch_halts_the_import() {
    let store = MemoryStore::new().with_failing_upsert(2);

    let error = import_batches(&store, &records("u1", 25, "Good"), 10).unwrap_err();

    match error {
        ImportError::Batch {
            batch,
            committed,
            source,
        } => {
            assert_eq!(batch, 2);
            assert_eq!(committed, 10);
            assert!(matches!(source, StoreError::Http { status: 503, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    // The third batch was never sent.
    assert_eq!(store.rows(SLEEP_RECORDS_TABLE).len(), 10);
}

#[test]
fn zero_batch_size_is_rejected() {
    let store = MemoryStore::new();
    assert!(matches!(
        import_batches(&store, &records("u1", 3, "Good"), 0),
        Err(ImportError::InvalidBatchSize)
    ));
    assert!(store.rows(SLEEP_RECORDS_TABLE).is_empty());
}

#[test]
fn empty_import_sends_nothing() {
    let store = MemoryStore::new();
    let report = import_batches(&store, &[], 50).unwrap();
    assert_eq!(report.batches, 0);
    assert_eq!(report.imported, 0);
}
