//! Conversion of normalized records into typed storage records.

use chrono::{Local, NaiveDate, NaiveTime};
use serde_json::Value;
use sleep_model::record::{COMMENTS_KEY, DATE_KEY, DATE_UNIX_KEY, UID_KEY};
use sleep_model::{
    FINAL_AWAKENING_TIME, FlatRecord, Question, SleepRecord, TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS,
    is_complete,
};
use tracing::{debug, warn};

use crate::error::{Result, TransformError};
use crate::normalization::{coerce_integer, parse_clock_time, parse_diary_date};

/// Identity and clock used when typing records.
#[derive(Debug, Clone)]
pub struct TransformContext {
    /// Identity the records are stored under.
    pub user_id: String,
    /// "Today" for resolving year-less diary dates.
    pub reference_date: NaiveDate,
}

impl TransformContext {
    /// Context for `user_id`, with today's local date as reference.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            reference_date: Local::now().date_naive(),
        }
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Resolve the record's diary date, if it has a parseable one.
    pub fn record_date(&self, record: &FlatRecord) -> Option<NaiveDate> {
        record_date(record, self.reference_date)
    }
}

fn record_date(record: &FlatRecord, reference_date: NaiveDate) -> Option<NaiveDate> {
    record
        .get(DATE_KEY)
        .and_then(Value::as_str)
        .and_then(|text| parse_diary_date(text, reference_date))
}

/// Type a normalized record for storage.
///
/// Unparseable dates become `None`. Malformed optional times and integers
/// become `None` with a warning. A missing `uid` or `date_unix` is an error.
pub fn transform_record(record: &FlatRecord, ctx: &TransformContext) -> Result<SleepRecord> {
    let date_unix = required(record, DATE_UNIX_KEY)?;
    let uid = required(record, UID_KEY)?;

    Ok(SleepRecord {
        user_id: ctx.user_id.clone(),
        date: ctx.record_date(record),
        date_unix,
        uid,
        comments: passthrough(record, COMMENTS_KEY),
        time_got_into_bed: time_field(record, Question::TimeGotIntoBed.field_name()),
        time_tried_to_sleep: time_field(record, Question::TimeTriedToSleep.field_name()),
        time_to_fall_asleep_mins: integer_field(
            record,
            Question::TimeToFallAsleepMins.field_name(),
        ),
        times_woke_up_count: integer_field(record, Question::TimesWokeUpCount.field_name()),
        total_awake_time_mins: integer_field(record, Question::TotalAwakeTimeMins.field_name()),
        final_awakening_time: time_field(record, FINAL_AWAKENING_TIME),
        time_in_bed_after_final_awakening_mins: integer_field(
            record,
            TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS,
        ),
        time_got_out_of_bed: time_field(record, Question::TimeGotOutOfBed.field_name()),
        sleep_quality_rating: passthrough(record, Question::SleepQualityRating.field_name()),
    })
}

fn required(record: &FlatRecord, field: &'static str) -> Result<Value> {
    record
        .get(field)
        .cloned()
        .ok_or(TransformError::MissingField { field })
}

fn passthrough(record: &FlatRecord, field: &str) -> Value {
    record.get(field).cloned().unwrap_or(Value::Null)
}

fn time_field(record: &FlatRecord, field: &str) -> Option<NaiveTime> {
    let value = record.get(field)?;
    match parse_clock_time(value) {
        Ok(time) => time,
        Err(error) => {
            warn!(field, %error, "unreadable time, storing null");
            None
        }
    }
}

fn integer_field(record: &FlatRecord, field: &str) -> Option<i64> {
    let value = record.get(field)?;
    match coerce_integer(value) {
        Ok(int) => int,
        Err(error) => {
            warn!(field, %error, "unreadable integer, storing null");
            None
        }
    }
}

/// Completed, dated records picked for import, with counts of what was left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSelection<'a> {
    pub records: Vec<&'a FlatRecord>,
    /// Records read.
    pub total: usize,
    /// Records whose `complete` flag was not `true`.
    pub incomplete: usize,
    /// Completed records whose date could not be parsed.
    pub undated: usize,
}

impl ImportSelection<'_> {
    /// Completed records, whether or not they were dated.
    pub fn completed(&self) -> usize {
        self.total - self.incomplete
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Type the selected records for storage under `ctx.user_id`.
    pub fn prepare(&self, ctx: &TransformContext) -> Result<PreparedImport> {
        let records = self
            .records
            .iter()
            .map(|record| transform_record(record, ctx))
            .collect::<Result<Vec<_>>>()?;
        Ok(PreparedImport {
            records,
            total: self.total,
            incomplete: self.incomplete,
            undated: self.undated,
        })
    }
}

/// Keep records whose `complete` flag is `true` and whose date parses
/// relative to `reference_date`.
pub fn select_for_import(
    records: &[FlatRecord],
    reference_date: NaiveDate,
) -> ImportSelection<'_> {
    let mut selection = ImportSelection {
        total: records.len(),
        ..ImportSelection::default()
    };

    for record in records {
        if !is_complete(record) {
            selection.incomplete += 1;
        } else if record_date(record, reference_date).is_none() {
            selection.undated += 1;
        } else {
            selection.records.push(record);
        }
    }

    debug!(
        total = selection.total,
        incomplete = selection.incomplete,
        undated = selection.undated,
        selected = selection.records.len(),
        "records selected for import"
    );
    selection
}

/// Typed records ready for import, with counts of what was left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedImport {
    pub records: Vec<SleepRecord>,
    pub total: usize,
    pub incomplete: usize,
    pub undated: usize,
}

impl PreparedImport {
    /// Completed records, whether or not they were dated.
    pub fn completed(&self) -> usize {
        self.total - self.incomplete
    }
}
