//! CLI argument definitions for the sleep diary tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sleep_store::{DEFAULT_BATCH_SIZE, DEFAULT_USER_EMAIL};

#[derive(Parser)]
#[command(
    name = "sleep-diary",
    version,
    about = "Export sleep diary data and import it into a hosted database",
    long_about = "Export sleep diary data and import it into a hosted database.\n\n\
                  Credentials are read from the environment or a .env file:\n\
                  CONSENSUS_API_TOKEN, CONSENSUS_API_URL, SUPABASE_URL, SUPABASE_SERVICE_KEY."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include personal values such as emails in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch sleep diary data and write it as CSV or JSON.
    Export(ExportArgs),

    /// Import completed diary records from a JSON file.
    Import(ImportArgs),

    /// Create a confirmed user account.
    CreateUser(CreateUserArgs),

    /// Change the email of an existing user.
    UpdateEmail(UpdateEmailArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Read a saved API payload instead of calling the API.
    #[arg(long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format (default: from the output extension, else CSV).
    #[arg(long = "format", value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Output path (default: sleep_data_<timestamp>.<ext>).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// JSON export or saved API payload to import.
    #[arg(value_name = "JSON_FILE")]
    pub file: PathBuf,

    /// Email of the user the records belong to.
    #[arg(long = "email", default_value = DEFAULT_USER_EMAIL)]
    pub email: String,

    /// Records per upsert request.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Run against an in-memory store without touching the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CreateUserArgs {
    #[arg(value_name = "EMAIL")]
    pub email: String,

    /// Password to set (default: random 16 characters).
    #[arg(long = "password")]
    pub password: Option<String>,
}

#[derive(Parser)]
pub struct UpdateEmailArgs {
    /// Current email of the user.
    #[arg(long = "old-email", default_value = DEFAULT_USER_EMAIL)]
    pub old_email: String,

    /// New email to set.
    #[arg(long = "new-email")]
    pub new_email: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
