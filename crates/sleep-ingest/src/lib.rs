//! Sleep diary data ingestion.
//!
//! This crate handles getting diary data into the pipeline:
//!
//! - **source**: the [`DataSource`] seam, with an HTTP client for the diary
//!   API and a reader for saved payload files
//! - **payload**: interpretation of a payload's shape, normalizing session
//!   days and falling back gracefully on unexpected structures

pub mod error;
pub mod payload;
pub mod source;

pub use error::{IngestError, Result};
pub use payload::{ExtractedRecords, PayloadShape, extract_records};
pub use source::{DEFAULT_API_URL, DataSource, FileSource, HttpSource};
