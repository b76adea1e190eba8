//! Unified application error type.
//! All modules (store, import, export, persist, cli) return AppError to keep
//! the error handling consistent and easy to manage.

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

/// Coarse classification used by callers that only care about the
/// category of a failure (validation, missing target, I/O, corrupt data).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Corrupt,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local storage
    // ---------------------------
    #[error("Local storage error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Event title must not be empty")]
    EmptyTitle,

    #[error("Date {date} is out of range ({min} .. {max})")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid save point name: '{0}'")]
    InvalidSavePointName(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Ambiguous event id '{0}': more than one event matches")]
    AmbiguousEventId(String),

    #[error("Invalid image '{0}': {1}")]
    InvalidImage(String, String),

    // ---------------------------
    // Not found
    // ---------------------------
    #[error("No event with id '{0}'")]
    EventNotFound(String),

    #[error("Save point not found: {0}")]
    SavePointNotFound(String),

    // ---------------------------
    // Corrupt data
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Save point '{name}' is corrupt: {reason}")]
    CorruptSavePoint { name: String, reason: String },

    #[error("Corrupt data: {0}")]
    Corrupt(String),

    // ---------------------------
    // Import errors
    // ---------------------------
    #[error("Import file must contain columns eventname, eventdate. Missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Import format not supported: {0}")]
    UnsupportedImportFormat(String),

    #[error("Failed to read import file: {0}")]
    ImportRead(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("{0} export is unavailable in this build")]
    ExportUnavailable(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::EmptyTitle
            | AppError::DateOutOfRange { .. }
            | AppError::InvalidDate(_)
            | AppError::InvalidSavePointName(_)
            | AppError::InvalidSetting(_)
            | AppError::AmbiguousEventId(_)
            | AppError::InvalidImage(..)
            | AppError::MissingColumns(_)
            | AppError::UnsupportedImportFormat(_)
            | AppError::InvalidExportFormat(_) => ErrorKind::Validation,

            AppError::EventNotFound(_) | AppError::SavePointNotFound(_) => ErrorKind::NotFound,

            AppError::Io(_)
            | AppError::Db(_)
            | AppError::ImportRead(_)
            | AppError::ExportUnavailable(_)
            | AppError::Export(_) => ErrorKind::Io,

            AppError::Json(_) | AppError::CorruptSavePoint { .. } | AppError::Corrupt(_) => {
                ErrorKind::Corrupt
            }

            AppError::Config(_) | AppError::ConfigLoad | AppError::ConfigSave | AppError::Other(_) => {
                ErrorKind::Internal
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
