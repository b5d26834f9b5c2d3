use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use sleep_cli::config::Config;
use sleep_cli::logging::redact_value;
use sleep_cli::pipeline::{ExportOutcome, ImportOptions, ImportOutcome, run_export, run_import};
use sleep_ingest::{FileSource, HttpSource};
use sleep_output::{ExportFormat, default_file_name};
use sleep_store::{EnsuredUser, MemoryStore, SupabaseClient, User, change_user_email, ensure_user};

use crate::cli::{CreateUserArgs, ExportArgs, ExportFormatArg, ImportArgs, UpdateEmailArgs};
use crate::summary::print_user;

pub fn run_export_command(args: &ExportArgs, config: &Config) -> Result<ExportOutcome> {
    let explicit = args.format.map(|format| match format {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Json => ExportFormat::Json,
    });
    let format = ExportFormat::resolve(explicit, args.output.as_deref());
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_file_name(format, Local::now().naive_local()));

    match &args.input {
        Some(input) => run_export(&FileSource::new(input), format, &path),
        None => {
            let creds = config.api_credentials()?;
            let source = HttpSource::new(creds.url, creds.token).context("create API client")?;
            run_export(&source, format, &path)
        }
    }
}

pub fn run_import_command(args: &ImportArgs, config: &Config) -> Result<ImportOutcome> {
    let options = ImportOptions::default()
        .with_email(args.email.clone())
        .with_batch_size(args.batch_size);

    if !args.file.is_file() {
        anyhow::bail!("file not found: {}", args.file.display());
    }

    if args.dry_run {
        info!("dry run, using in-memory store");
        return run_import(&MemoryStore::new(), &args.file, &options, print_user);
    }
    let store = store_client(config)?;
    run_import(&store, &args.file, &options, print_user)
}

pub fn run_create_user(args: &CreateUserArgs, config: &Config) -> Result<EnsuredUser> {
    let store = store_client(config)?;
    info!(email = redact_value(&args.email), "creating user");
    ensure_user(&store, &args.email, args.password.as_deref()).context("create user")
}

pub fn run_update_email(args: &UpdateEmailArgs, config: &Config) -> Result<User> {
    let store = store_client(config)?;
    info!(
        old_email = redact_value(&args.old_email),
        new_email = redact_value(&args.new_email),
        "updating user email"
    );
    change_user_email(&store, &args.old_email, &args.new_email).context("update user email")
}

fn store_client(config: &Config) -> Result<SupabaseClient> {
    let creds = config.store_credentials()?;
    SupabaseClient::new(creds.url, &creds.service_key).context("create store client")
}
