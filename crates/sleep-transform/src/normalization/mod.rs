//! Normalization of free-text diary answers into typed values.
//!
//! - **datetime**: diary dates without a year, and `H:MM` clock times
//! - **numeric**: integer coercion of counts and durations

pub mod datetime;
pub mod numeric;

pub use datetime::{is_null_text, parse_clock_time, parse_diary_date};
pub use numeric::coerce_integer;
