//! Reading saved payloads from disk.

use std::fs;

use serde_json::json;
use sleep_ingest::{DataSource, FileSource, IngestError, PayloadShape, extract_records};

#[test]
fn saved_session_payload_round_trips_through_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.json");
    let payload = json!({
        "data": {
            "uid": "s-1",
            "userId": "u-1",
            "jsonData": json!({
                "days": [
                    {"date": "Mar 3", "complete": true, "answers": [{"v": "23:10"}]}
                ]
            })
            .to_string(),
        }
    });
    fs::write(&path, payload.to_string()).unwrap();

    let source = FileSource::new(&path);
    let extracted = extract_records(source.fetch().unwrap()).unwrap();

    assert_eq!(extracted.shape, PayloadShape::Session);
    assert_eq!(extracted.records[0]["time_got_into_bed"], json!("23:10"));
    assert_eq!(source.describe(), path.display().to_string());
}

#[test]
fn invalid_json_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = FileSource::new(&path).fetch().unwrap_err();
    assert!(matches!(err, IngestError::FileParse { .. }));
}
