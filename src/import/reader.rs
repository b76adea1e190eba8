//! Tabular readers: first worksheet of a spreadsheet, or a CSV file.

use super::rows::{Cell, RawRow};
use crate::errors::{AppError, AppResult};
use std::path::Path;

pub const NAME_COLUMN: &str = "eventname";
pub const DATE_COLUMN: &str = "eventdate";

/// Header row plus data rows, cells untouched.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Locate both required columns (case-insensitive) and project every
    /// row onto them. Fails without producing any row when a column is
    /// missing.
    pub fn into_raw_rows(self) -> AppResult<Vec<RawRow>> {
        let find = |wanted: &str| {
            self.headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };

        let name_idx = find(NAME_COLUMN);
        let date_idx = find(DATE_COLUMN);

        let (Some(name_idx), Some(date_idx)) = (name_idx, date_idx) else {
            let mut missing = Vec::new();
            if name_idx.is_none() {
                missing.push(NAME_COLUMN.to_string());
            }
            if date_idx.is_none() {
                missing.push(DATE_COLUMN.to_string());
            }
            return Err(AppError::MissingColumns(missing));
        };

        Ok(self
            .rows
            .into_iter()
            .map(|mut r| {
                let take = |r: &mut Vec<Cell>, i: usize| {
                    r.get_mut(i)
                        .map(|c| std::mem::replace(c, Cell::Empty))
                        .unwrap_or(Cell::Empty)
                };
                let name = take(&mut r, name_idx);
                let date = take(&mut r, date_idx);
                RawRow::new(name, date)
            })
            .collect())
    }
}

/// Read a table from `path`, choosing the reader by file extension.
pub fn read_table(path: &Path) -> AppResult<Table> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_spreadsheet(path),
        other => Err(AppError::UnsupportedImportFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}

fn read_csv(path: &Path) -> AppResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::ImportRead(format!("CSV open error: {e}")))?;

    let headers = rdr
        .headers()
        .map_err(|e| AppError::ImportRead(format!("CSV header error: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| AppError::ImportRead(format!("CSV read error: {e}")))?;
        rows.push(
            record
                .iter()
                .map(|v| {
                    if v.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(v.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Table { headers, rows })
}

#[cfg(feature = "xlsx")]
fn read_spreadsheet(path: &Path) -> AppResult<Table> {
    use calamine::{Reader, open_workbook_auto};

    let mut workbook =
        open_workbook_auto(path).map_err(|e| AppError::ImportRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ImportRead("workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::ImportRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| {
            r.iter()
                .map(|c| cell_from_data(c).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .map(|r| r.iter().map(cell_from_data).collect())
        .collect();

    Ok(Table { headers, rows })
}

#[cfg(not(feature = "xlsx"))]
fn read_spreadsheet(path: &Path) -> AppResult<Table> {
    Err(AppError::UnsupportedImportFormat(format!(
        "{} (spreadsheet support not compiled in)",
        path.display()
    )))
}

#[cfg(feature = "xlsx")]
fn cell_from_data(d: &calamine::Data) -> Cell {
    use crate::export::excel_date::excel_serial_to_date;
    use calamine::Data;

    match d {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_date(serial)
                .map(Cell::Date)
                .unwrap_or(Cell::Number(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
