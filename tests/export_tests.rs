mod common;
use chrono::NaiveDate;
use common::png;
use rtimeline::core::add::AddLogic;
use rtimeline::core::session::Session;
#[cfg(not(feature = "pdf"))]
use rtimeline::errors::AppError;
use rtimeline::export::{ExportFormat, ExportLogic, ExportRow};
use rtimeline::import::ImportLogic;
use std::fs;
use std::path::Path;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_session() -> Session {
    let today = d(2024, 12, 31);
    let mut s = Session::default();
    AddLogic::apply(&mut s, "Third", d(2023, 3, 3), None, today).unwrap();
    AddLogic::apply(&mut s, "First, with comma", d(2010, 1, 1), Some(png()), today).unwrap();
    AddLogic::apply(&mut s, "Second \"quoted\"", d(2015, 6, 15), None, today).unwrap();
    s
}

fn titles_and_dates(s: &Session) -> Vec<(String, NaiveDate)> {
    s.store
        .list_sorted()
        .iter()
        .map(|e| (e.title.clone(), e.date))
        .collect()
}

fn roundtrip(format: ExportFormat, path: &Path) {
    let original = sample_session();
    let n = ExportLogic::export(&original, format, path, true).unwrap();
    assert_eq!(n, 3);

    let mut fresh = Session::default();
    let out = ImportLogic::run(&mut fresh, path).unwrap();
    assert_eq!(out.accepted.len(), 3);
    assert_eq!(titles_and_dates(&fresh), titles_and_dates(&original));

    // Importing the same file again adds nothing.
    let again = ImportLogic::run(&mut fresh, path).unwrap();
    assert_eq!(again.duplicates, 3);
    assert_eq!(fresh.store.len(), 3);
}

#[test]
fn test_csv_export_then_import_is_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(ExportFormat::Csv, &dir.path().join("events.csv"));
}

#[cfg(feature = "xlsx")]
#[test]
fn test_xlsx_export_then_import_is_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    roundtrip(ExportFormat::Xlsx, &dir.path().join("events.xlsx"));
}

#[test]
fn test_csv_has_exact_columns_in_chronological_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    ExportLogic::export(&sample_session(), ExportFormat::Csv, &path, true).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["eventname", "eventdate", "image"]);

    let rows: Vec<ExportRow> = rdr.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows[0].eventname, "First, with comma");
    assert_eq!(rows[0].eventdate, "2010-01-01");
    assert!(!rows[0].image.is_empty());
    assert_eq!(rows[1].eventname, "Second \"quoted\"");
    assert!(rows[2].image.is_empty());
}

#[test]
fn test_json_export_is_an_array_of_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    ExportLogic::export(&sample_session(), ExportFormat::Json, &path, true).unwrap();

    let rows: Vec<ExportRow> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let dates: Vec<&str> = rows.iter().map(|r| r.eventdate.as_str()).collect();
    assert_eq!(dates, ["2010-01-01", "2015-06-15", "2023-03-03"]);
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_export_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    ExportLogic::export(&sample_session(), ExportFormat::Pdf, &path, true).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    // The sample's only picture is a PNG, which is listed but not embedded.
    assert!(!String::from_utf8_lossy(&bytes).contains("/DCTDecode"));
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_export_embeds_jpeg_pictures() {
    let today = d(2024, 12, 31);
    let mut s = sample_session();
    AddLogic::apply(&mut s, "Photo", d(2020, 2, 2), Some(common::jpeg()), today).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photos.pdf");
    ExportLogic::export(&s, ExportFormat::Pdf, &path, true).unwrap();
    let text = String::from_utf8_lossy(&fs::read(&path).unwrap()).into_owned();
    assert_eq!(text.matches("/DCTDecode").count(), 1);
    assert!(text.contains("/XObject"));
}

#[cfg(not(feature = "pdf"))]
#[test]
fn test_pdf_export_is_unavailable_without_the_engine() {
    assert!(matches!(
        ExportFormat::Pdf.ensure_available(),
        Err(AppError::ExportUnavailable(ref f)) if f == "PDF"
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let err = ExportLogic::export(&sample_session(), ExportFormat::Pdf, &path, true).unwrap_err();
    assert!(matches!(err, AppError::ExportUnavailable(ref f) if f == "PDF"));
    assert_eq!(err.to_string(), "PDF export is unavailable in this build");
    assert!(!path.exists());
}

#[test]
fn test_empty_store_exports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let n = ExportLogic::export(&Session::default(), ExportFormat::Csv, &path, true).unwrap();
    assert_eq!(n, 0);
    assert!(!path.exists());
}

#[test]
fn test_engine_availability_matches_build() {
    assert!(ExportFormat::Csv.is_available());
    assert!(ExportFormat::Json.is_available());
    assert_eq!(ExportFormat::Xlsx.is_available(), cfg!(feature = "xlsx"));
    assert_eq!(ExportFormat::Pdf.is_available(), cfg!(feature = "pdf"));
}

#[test]
fn test_format_is_guessed_from_extension() {
    assert_eq!(
        ExportFormat::from_path(Path::new("a/b.JSON")).unwrap(),
        ExportFormat::Json
    );
    assert!(ExportFormat::from_path(Path::new("a/b.txt")).is_err());
}

#[test]
fn test_export_to_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExportLogic::export(&sample_session(), ExportFormat::Csv, dir.path(), true);
    assert!(err.is_err());
}
