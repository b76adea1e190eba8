// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::pdf::{Jpeg, PdfRow, TimelinePdf};
use crate::export::{ExportRow, notify_export_success};
use crate::models::image::ImageData;
use crate::ui::messages::info;
use crate::utils::date::today;
use std::path::Path;

const HEADERS: [&str; 4] = ["#", "date", "event", "image"];
const WIDTHS: [f32; 4] = [0.08, 0.18, 0.60, 0.14];

/// Export a printable event list titled after the timeline.
pub(crate) fn export_pdf(rows: &[ExportRow], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let table: Vec<PdfRow> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let (marker, picture) = image_cell(&r.image);
            PdfRow {
                cells: vec![
                    (i + 1).to_string(),
                    r.eventdate.clone(),
                    r.eventname.clone(),
                    marker,
                ],
                picture,
            }
        })
        .collect();

    let subtitle = format!(
        "Generated on {} - {} events",
        today().format("%B %d, %Y"),
        rows.len()
    );

    let mut pdf = TimelinePdf::new();
    pdf.write_table(title, &subtitle, &HEADERS, &WIDTHS, &table);
    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

/// JPEG payloads are embedded; other formats print their extension.
fn image_cell(payload: &str) -> (String, Option<Jpeg>) {
    if payload.is_empty() {
        return ("-".to_string(), None);
    }
    match ImageData::from_base64(payload) {
        Ok(img) => match Jpeg::parse(img.as_bytes()) {
            Some(jpeg) => (String::new(), Some(jpeg)),
            None => (img.extension().to_string(), None),
        },
        Err(_) => ("?".to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_jpeg_cells_carry_a_picture() {
        assert_eq!(image_cell(""), ("-".to_string(), None));
        assert_eq!(image_cell("not base64!"), ("?".to_string(), None));

        let png = ImageData::new(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(image_cell(&png.to_base64()), ("png".to_string(), None));
    }
}
