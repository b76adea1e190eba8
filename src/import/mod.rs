// src/import/mod.rs

pub mod reader;
pub mod rows;

pub use reader::{Table, read_table};
pub use rows::{Cell, ImportOutcome, RawRow, import_rows};

use crate::core::session::Session;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// High-level import: file → rows → store.
pub struct ImportLogic;

impl ImportLogic {
    /// Read `path`, merge every accepted row into the session store (in file
    /// order) and report the counts. The store is untouched when the file
    /// cannot be read or lacks a required column.
    pub fn run(session: &mut Session, path: &Path) -> AppResult<ImportOutcome> {
        info(format!("Reading import file: {}", path.display()));

        let table = read_table(path)?;
        info(format!("Found {} rows in import file", table.rows.len()));

        let raw_rows = table.into_raw_rows()?;
        let mut existing = session.store.keys();
        let outcome = import_rows(&raw_rows, &mut existing);

        for w in &outcome.warnings {
            warning(w);
        }

        if outcome.accepted.is_empty() {
            warning(
                "No valid rows found to import. Check that the file has proper eventname and eventdate columns.",
            );
        } else {
            session.store.extend(outcome.accepted.clone());
            success(format!(
                "Successfully imported {} events.",
                outcome.accepted.len()
            ));
        }

        if outcome.skipped > 0 {
            info(format!(
                "Skipped {} rows due to missing data or invalid dates",
                outcome.skipped
            ));
        }
        if outcome.duplicates > 0 {
            info(format!(
                "Skipped {} duplicate events that already exist",
                outcome.duplicates
            ));
        }

        Ok(outcome)
    }
}
