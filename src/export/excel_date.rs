// src/export/excel_date.rs

use chrono::{Duration, NaiveDate};

/// Day zero of the spreadsheet serial calendar (1900 date system, with the
/// historical 1900-02-29 quirk folded in).
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Serial day number for a calendar date.
#[cfg_attr(not(feature = "xlsx"), allow(dead_code))]
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> f64 {
    (d - excel_epoch()).num_days() as f64
}

/// Calendar date for a serial number; the fractional (time) part is ignored.
/// Values outside the range spreadsheets can represent yield `None`.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }
    excel_epoch().checked_add_signed(Duration::days(serial.trunc() as i64))
}
