//! Error types for diary data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or interpreting a payload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Fetch Errors ===
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(String),

    /// The request did not complete.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Http { status: u16, body: String },

    /// The response body was not JSON.
    #[error("failed to decode API response: {0}")]
    Decode(String),

    // === File Errors ===
    /// Payload file not found.
    #[error("payload file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the payload file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload file is not valid JSON.
    #[error("failed to parse JSON in {path}: {source}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Shape Errors ===
    /// The session's embedded `jsonData` text is not valid JSON.
    #[error("failed to parse embedded session data: {source}")]
    EmbeddedJson {
        #[source]
        source: serde_json::Error,
    },

    /// No records could be recovered from the payload.
    #[error("no records found in the payload")]
    NoRecords,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
