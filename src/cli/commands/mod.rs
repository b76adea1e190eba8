pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod log;
pub mod savepoint;
pub mod settings;
pub mod storage;

use crate::errors::{AppError, AppResult};
use crate::models::image::ImageData;
use crate::utils::date;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::fs;

/// Read a picture file given on the command line.
pub(crate) fn read_image(path: &str) -> AppResult<ImageData> {
    let p = expand_tilde(path);
    let bytes = fs::read(&p).map_err(|e| AppError::InvalidImage(path.to_string(), e.to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::InvalidImage(path.to_string(), "file is empty".into()));
    }
    Ok(ImageData::new(bytes))
}

/// Strict `YYYY-MM-DD` parse of a command-line date.
pub(crate) fn parse_cli_date(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}
