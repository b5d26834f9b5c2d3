//! Typed records for the `sleep_records` table.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table the import writes into.
pub const SLEEP_RECORDS_TABLE: &str = "sleep_records";

/// Columns forming the natural key of a stored record.
pub const CONFLICT_KEYS: [&str; 2] = ["user_id", "date"];

/// A storage-ready diary day.
///
/// At most one record exists per `(user_id, date)`; importing the same pair
/// again overwrites the stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    pub user_id: String,
    /// `None` when the diary date could not be parsed; such records are not
    /// imported.
    pub date: Option<NaiveDate>,
    pub date_unix: Value,
    pub uid: Value,
    pub comments: Value,
    pub time_got_into_bed: Option<NaiveTime>,
    pub time_tried_to_sleep: Option<NaiveTime>,
    pub time_to_fall_asleep_mins: Option<i64>,
    pub times_woke_up_count: Option<i64>,
    pub total_awake_time_mins: Option<i64>,
    pub final_awakening_time: Option<NaiveTime>,
    pub time_in_bed_after_final_awakening_mins: Option<i64>,
    pub time_got_out_of_bed: Option<NaiveTime>,
    pub sleep_quality_rating: Value,
}

impl SleepRecord {
    /// The `(user_id, date)` natural key, if the date is known.
    #[must_use]
    pub fn natural_key(&self) -> Option<(&str, NaiveDate)> {
        self.date.map(|date| (self.user_id.as_str(), date))
    }
}
