//! Sleep diary transformation pipeline.
//!
//! - **flatten**: nested objects to `_`-joined key paths
//! - **answers**: positional answers to named question fields
//! - **normalize**: diary day + session metadata to one flat record
//! - **typed**: flat records to typed storage records
//! - **normalization**: date, clock-time and integer parsing

pub mod answers;
pub mod error;
pub mod flatten;
pub mod normalization;
pub mod normalize;
pub mod typed;

pub use answers::map_answers;
pub use error::{IntegerParseError, Result, TimeParseError, TransformError};
pub use flatten::{DEFAULT_SEPARATOR, encode_sequence, flatten, flatten_with};
pub use normalize::{normalize_day, unwrap_comments};
pub use typed::{
    ImportSelection, PreparedImport, TransformContext, select_for_import, transform_record,
};
