// src/export/logic.rs

use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportRow, export_rows};
use crate::export::ExportFormat;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the session's events, oldest first, to `path`.
    ///
    /// Returns the number of rows written (0 when there was nothing to
    /// export). A format whose engine is missing from this build fails with
    /// `ExportUnavailable` before anything touches the disk.
    pub fn export(
        session: &Session,
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<usize> {
        format.ensure_available()?;

        let sorted = session.store.list_sorted();
        if sorted.is_empty() {
            warning("No events to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows = export_rows(&sorted);
        write_rows(format, &rows, path, &session.settings.timeline_title)?;
        Ok(rows.len())
    }
}

#[cfg_attr(not(feature = "pdf"), allow(unused_variables))]
fn write_rows(format: ExportFormat, rows: &[ExportRow], path: &Path, title: &str) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        #[cfg(feature = "xlsx")]
        ExportFormat::Xlsx => crate::export::xlsx::export_xlsx(rows, path),
        #[cfg(feature = "pdf")]
        ExportFormat::Pdf => crate::export::pdf_export::export_pdf(rows, path, title),
        #[allow(unreachable_patterns)]
        other => Err(AppError::ExportUnavailable(other.as_str().to_uppercase())),
    }
}
