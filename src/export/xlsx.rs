// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::date_to_excel_serial;
use crate::export::model::get_headers;
use crate::export::{ExportRow, notify_export_success};
use crate::models::image::ImageData;
use crate::ui::messages::{info, warning};
use crate::utils::date::parse_date;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Longest text a spreadsheet cell can hold.
const MAX_CELL_CHARS: usize = 32_767;

/// Widest column we size automatically (image payloads would be huge).
const MAX_COL_WIDTH: usize = 60;

/// Export XLSX: styled header, banded rows, real date cells.
pub(crate) fn export_xlsx(rows: &[ExportRow], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("events").map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, r) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        write_text(worksheet, row, 0, &r.eventname, band)?;
        write_date(worksheet, row, 1, &r.eventdate, band)?;

        let image_cell = if r.image.chars().count() > MAX_CELL_CHARS {
            warning(format!(
                "Image of '{}' is too large for a spreadsheet cell; writing a placeholder",
                r.eventname
            ));
            let bytes = ImageData::from_base64(&r.image)
                .map(|img| img.len())
                .unwrap_or(r.image.len() / 4 * 3);
            format!("[image: {bytes} bytes]")
        } else {
            r.image.clone()
        };
        write_text(worksheet, row, 2, &image_cell, band)?;

        col_widths[0] = col_widths[0].max(UnicodeWidthStr::width(r.eventname.as_str()));
        col_widths[1] = col_widths[1].max(10);
        col_widths[2] = col_widths[2].max(UnicodeWidthStr::width(image_cell.as_str()));
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(MAX_COL_WIDTH) as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_text(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    ws.write_with_format(row, col, s, &cell_format(bg))
        .map_err(to_export_error)?;
    Ok(())
}

/// Dates go out as serial numbers with a date format so spreadsheet tools
/// (and our own importer) see a real date cell.
fn write_date(ws: &mut Worksheet, row: u32, col: u16, iso: &str, bg: Color) -> AppResult<()> {
    match parse_date(iso) {
        Some(d) => {
            let fmt = cell_format(bg).set_num_format("yyyy-mm-dd");
            ws.write_with_format(row, col, date_to_excel_serial(d), &fmt)
                .map_err(to_export_error)?;
            Ok(())
        }
        None => write_text(ws, row, col, iso, bg),
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
