//! Sleep diary data model.
//!
//! - **question**: the fixed, positional question schema
//! - **answer**: classification of raw answer entries
//! - **record**: diary days, session metadata and flat export records
//! - **storage**: typed records for relational storage

pub mod answer;
pub mod error;
pub mod question;
pub mod record;
pub mod storage;

pub use answer::{RawAnswer, TAG_KEY, tagged_value};
pub use error::{ModelError, Result, value_kind};
pub use question::{FINAL_AWAKENING_TIME, Question, TIME_IN_BED_AFTER_FINAL_AWAKENING_MINS};
pub use record::{DiaryDay, FlatRecord, SessionMetadata, is_complete};
pub use storage::{CONFLICT_KEYS, SLEEP_RECORDS_TABLE, SleepRecord};
