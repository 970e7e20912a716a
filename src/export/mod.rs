//! File exports of the tracker state: spreadsheet CSV, plain-text report,
//! and a full JSON backup of the persisted snapshot.

mod csv;
mod report;

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use spending_domain::Snapshot;

use crate::errors::AppError;

pub use self::csv::{write_csv, CSV_HEADER};
pub use self::report::text_report;

const FILE_PREFIX: &str = "spending-tracker";

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "report",
            ExportFormat::Json => "json",
        };
        f.write_str(label)
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" | "excel" => Ok(ExportFormat::Csv),
            "report" | "txt" | "pdf" => Ok(ExportFormat::Report),
            "json" | "backup" => Ok(ExportFormat::Json),
            other => Err(AppError::input(format!("unknown export format `{other}`"))),
        }
    }
}

/// `spending-tracker-YYYY-MM-DD.<ext>`.
pub fn default_file_name(extension: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        FILE_PREFIX,
        date.format("%Y-%m-%d"),
        extension.trim_start_matches('.')
    )
}

/// Pretty-printed snapshot, loadable as a persisted payload.
pub fn json_backup(snapshot: &Snapshot) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
