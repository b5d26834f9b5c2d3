//! Error types for record transformation.

use thiserror::Error;

/// A record could not be turned into a storage record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A field every stored record carries is absent.
    #[error("record is missing required field '{field}'")]
    MissingField { field: &'static str },
}

/// A time-of-day answer could not be read.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("expected H:MM or HH:MM text, found {0}")]
    NotText(&'static str),
    #[error("expected H:MM or HH:MM")]
    Format,
    #[error("hour or minute out of range")]
    OutOfRange,
}

/// An integer answer could not be read.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IntegerParseError {
    #[error("expected an integer, found {0}")]
    WrongKind(&'static str),
    #[error("text is not an integer")]
    NotInteger,
    #[error("number does not fit in 64 bits")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, TransformError>;
