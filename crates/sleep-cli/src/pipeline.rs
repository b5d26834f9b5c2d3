//! Export and import flows, independent of argument parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use sleep_ingest::{DataSource, FileSource, PayloadShape, extract_records};
use sleep_model::{FlatRecord, SLEEP_RECORDS_TABLE};
use sleep_output::{ExportFormat, export_records};
use sleep_store::{
    DEFAULT_BATCH_SIZE, DEFAULT_USER_EMAIL, EnsuredUser, ImportReport, RecordStore, UserStore,
    ensure_user, import_batches,
};
use sleep_transform::{TransformContext, flatten, select_for_import};
use tracing::{info, info_span};

use crate::logging::redact_value;

/// Result of an export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub source: String,
    pub shape: PayloadShape,
    pub format: ExportFormat,
    pub path: PathBuf,
    pub records: usize,
    pub skipped: usize,
}

/// Fetch a payload and flatten its records for export.
pub fn load_export_records<S: DataSource + ?Sized>(
    source: &S,
) -> Result<(PayloadShape, Vec<FlatRecord>, usize)> {
    let payload = source
        .fetch()
        .with_context(|| format!("fetch sleep data from {}", source.describe()))?;
    let extracted = extract_records(payload).context("read sleep records")?;
    let records = extracted.records.iter().map(flatten).collect();
    Ok((extracted.shape, records, extracted.skipped))
}

/// Fetch, flatten and write records to `path`.
pub fn run_export<S: DataSource + ?Sized>(
    source: &S,
    format: ExportFormat,
    path: &Path,
) -> Result<ExportOutcome> {
    let span = info_span!("export", format = %format);
    let _guard = span.enter();

    let (shape, records, skipped) = load_export_records(source)?;
    export_records(&records, format, path)
        .with_context(|| format!("write {format} export to {}", path.display()))?;
    info!(records = records.len(), path = %path.display(), "export written");

    Ok(ExportOutcome {
        source: source.describe(),
        shape,
        format,
        path: path.to_path_buf(),
        records: records.len(),
        skipped,
    })
}

/// Options for an import run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub email: String,
    pub batch_size: usize,
    /// "Today" for resolving year-less diary dates; `None` uses the local date.
    pub reference_date: Option<NaiveDate>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            email: DEFAULT_USER_EMAIL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            reference_date: None,
        }
    }
}

impl ImportOptions {
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}

/// Result of an import run.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub user: EnsuredUser,
    /// Records read from the file.
    pub read: usize,
    pub completed: usize,
    pub incomplete: usize,
    pub undated: usize,
    /// Completed, dated records sent to the store.
    pub selected: usize,
    pub report: ImportReport,
    /// Rows stored for the user after the import.
    pub stored_total: usize,
}

/// Import completed, dated records from a JSON file into `store`.
///
/// The file is read and filtered before the store is contacted, so an empty
/// selection leaves the store untouched. `on_user` runs as soon as the user
/// exists, before any record is written, so a newly created password is
/// reported even when a later batch fails. Batches are upserted in order and
/// the import stops at the first failure.
pub fn run_import<S, F>(
    store: &S,
    path: &Path,
    options: &ImportOptions,
    on_user: F,
) -> Result<ImportOutcome>
where
    S: UserStore + RecordStore + ?Sized,
    F: FnOnce(&EnsuredUser),
{
    let span = info_span!("import", email = redact_value(&options.email));
    let _guard = span.enter();

    if options.batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let payload = FileSource::new(path)
        .fetch()
        .with_context(|| format!("load {}", path.display()))?;
    let extracted = extract_records(payload).context("read sleep records")?;

    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let selection = select_for_import(&extracted.records, reference_date);
    info!(
        completed = selection.completed(),
        selected = selection.records.len(),
        total = selection.total,
        "completed records selected"
    );
    if selection.is_empty() {
        bail!(
            "no completed records with a readable date in {} ({} read)",
            path.display(),
            selection.total
        );
    }

    let user = ensure_user(store, &options.email, None).context("ensure user exists")?;
    info!(user_id = %user.user.id, created = user.created(), "user ready");
    on_user(&user);

    let ctx = TransformContext::new(user.user.id.as_str()).with_reference_date(reference_date);
    let prepared = selection.prepare(&ctx).context("prepare records")?;

    let report = import_batches(store, &prepared.records, options.batch_size)
        .context("import sleep records")?;
    let stored_total = store
        .count_for_user(SLEEP_RECORDS_TABLE, &user.user.id)
        .context("verify imported records")?;
    info!(imported = report.imported, stored_total, "import verified");

    Ok(ImportOutcome {
        read: prepared.total,
        completed: prepared.completed(),
        incomplete: prepared.incomplete,
        undated: prepared.undated,
        selected: prepared.records.len(),
        user,
        report,
        stored_total,
    })
}
