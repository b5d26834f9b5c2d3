//! Batched, ordered import of typed records.

use sleep_model::{CONFLICT_KEYS, SLEEP_RECORDS_TABLE, SleepRecord};
use tracing::{debug, error, info};

use crate::error::ImportError;
use crate::model::RecordStore;

/// Records per upsert when none is given.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Outcome of a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub batches: usize,
    pub imported: usize,
}

/// Upsert `records` into the sleep records table in batches of `batch_size`.
///
/// Batches are sent in order and the import stops at the first failing
/// batch. Batches already sent stay stored, so re-running the import after
/// a failure is safe.
pub fn import_batches<S: RecordStore + ?Sized>(
    store: &S,
    records: &[SleepRecord],
    batch_size: usize,
) -> Result<ImportReport, ImportError> {
    if batch_size == 0 {
        return Err(ImportError::InvalidBatchSize);
    }

    let mut report = ImportReport::default();
    for (index, chunk) in records.chunks(batch_size).enumerate() {
        let batch = index + 1;
        debug!(batch, records = chunk.len(), "upserting batch");
        match store.upsert(SLEEP_RECORDS_TABLE, chunk, &CONFLICT_KEYS) {
            Ok(written) => {
                report.batches = batch;
                report.imported += written;
                info!(batch, records = written, "batch imported");
            }
            Err(source) => {
                error!(batch, committed = report.imported, error = %source, "batch failed");
                return Err(ImportError::Batch {
                    batch,
                    committed: report.imported,
                    source,
                });
            }
        }
    }
    Ok(report)
}
