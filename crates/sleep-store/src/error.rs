//! Error types for stores and imports.

use thiserror::Error;

/// Errors reported by a user or record store.
#[derive(Debug, Error)]
pub enum StoreError {
    // === Client ===
    #[error("failed to create store client: {0}")]
    Client(String),

    // === Transport ===
    #[error("network error: {0}")]
    Network(String),

    #[error("store responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("unexpected store response: {0}")]
    Decode(String),

    // === Users ===
    /// The user already exists. Recoverable by looking the user up.
    #[error("user {email} already exists")]
    Conflict { email: String },

    #[error("no user with email {email}")]
    UserNotFound { email: String },

    // === Records ===
    #[error("record {uid} has no date and cannot be keyed")]
    MissingNaturalKey { uid: String },
}

impl StoreError {
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Errors from a batched import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("batch size must be at least 1")]
    InvalidBatchSize,

    /// A batch failed; earlier batches stay stored.
    #[error("batch {batch} failed after {committed} records were stored: {source}")]
    Batch {
        /// 1-based batch number.
        batch: usize,
        /// Records stored by earlier batches.
        committed: usize,
        #[source]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
