use crate::core::validate::{MIN_DATE, is_importable_date};
use crate::export::excel_date::excel_serial_to_date;
use crate::models::event::{NewEvent, dedup_key};
use crate::utils::date::parse_date_lenient;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// One cell as delivered by a tabular reader.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    /// Plain number; in a date column it is read as a spreadsheet serial.
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Text form of the cell, or `None` for empty / blank cells.
    pub fn as_text(&self) -> Option<String> {
        let s = match self {
            Cell::Empty => return None,
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        if s.trim().is_empty() { None } else { Some(s) }
    }

    /// Coerce the cell to a calendar date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::DateTime(dt) => Some(dt.date()),
            Cell::Number(n) => excel_serial_to_date(*n),
            Cell::Text(s) => parse_date_lenient(s),
            Cell::Bool(_) | Cell::Empty => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.as_text().is_none()
    }
}

/// The two columns the importer cares about, for one data row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub name: Cell,
    pub date: Cell,
}

impl RawRow {
    pub fn new(name: Cell, date: Cell) -> Self {
        Self { name, date }
    }

    /// Convenience for text-only sources (CSV, tests).
    pub fn text(name: &str, date: &str) -> Self {
        Self {
            name: Cell::Text(name.to_string()),
            date: Cell::Text(date.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    /// Accepted events, in input row order.
    pub accepted: Vec<NewEvent>,
    /// Rows with missing data, unreadable dates or dates before MIN_DATE.
    pub skipped: usize,
    /// Rows whose `(title, date)` already existed.
    pub duplicates: usize,
    /// One human-readable line per skipped row that deserves an explanation.
    pub warnings: Vec<String>,
}

/// Validate and de-duplicate candidate rows.
///
/// `existing` is seeded with the keys already in the store and grows with
/// every accepted row, so duplicates inside the same file are caught too.
/// Dates are only checked against the lower bound; future dates are kept.
pub fn import_rows(rows: &[RawRow], existing: &mut HashSet<(String, String)>) -> ImportOutcome {
    let mut out = ImportOutcome::default();

    for (idx, row) in rows.iter().enumerate() {
        let row_no = idx + 1;

        let (Some(name), false) = (row.name.as_text(), row.date.is_missing()) else {
            out.skipped += 1;
            continue;
        };

        let Some(date) = row.date.as_date() else {
            out.warnings.push(format!(
                "Row {row_no}: skipping event '{name}' - invalid date format: {}",
                row.date.as_text().unwrap_or_default()
            ));
            out.skipped += 1;
            continue;
        };

        if !is_importable_date(date) {
            out.warnings.push(format!(
                "Row {row_no}: skipping event '{name}' - date {date} is before minimum allowed date ({MIN_DATE})"
            ));
            out.skipped += 1;
            continue;
        }

        let key = dedup_key(&name, date);
        if existing.contains(&key) {
            out.duplicates += 1;
            continue;
        }
        existing.insert(key);

        out.accepted.push(NewEvent {
            title: name.trim().to_string(),
            date,
            image: None,
        });
    }

    out
}
