// src/export/mod.rs

pub(crate) mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
mod pdf_export;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use logic::ExportLogic;
pub use model::{ExportRow, export_rows};

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Common completion message for every format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Whether the serialization engine for this format was compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            ExportFormat::Csv | ExportFormat::Json => true,
            ExportFormat::Xlsx => cfg!(feature = "xlsx"),
            ExportFormat::Pdf => cfg!(feature = "pdf"),
        }
    }

    /// `Ok(())` when the engine is present, `ExportUnavailable` otherwise.
    pub fn ensure_available(&self) -> AppResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(AppError::ExportUnavailable(self.as_str().to_uppercase()))
        }
    }

    /// Guess the format from the output file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }
}
