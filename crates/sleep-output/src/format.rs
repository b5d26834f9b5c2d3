//! Export formats and output file naming.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::warn;

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Format named by the path's extension, if recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// An explicit format wins; otherwise infer from `path`, defaulting to CSV.
    #[must_use]
    pub fn resolve(explicit: Option<Self>, path: Option<&Path>) -> Self {
        if let Some(format) = explicit {
            return format;
        }
        match path {
            Some(path) => Self::from_path(path).unwrap_or_else(|| {
                warn!(
                    path = %path.display(),
                    "unrecognized output extension, writing CSV"
                );
                Self::Csv
            }),
            None => Self::default(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Json => f.write_str("JSON"),
        }
    }
}

/// Timestamped default output name, e.g. `sleep_data_20250115_083000.csv`.
#[must_use]
pub fn default_file_name(format: ExportFormat, now: NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "sleep_data_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}
