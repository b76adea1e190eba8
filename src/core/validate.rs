use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Earliest date any event may carry.
pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2002, 1, 1) {
    Some(d) => d,
    None => panic!("invalid MIN_DATE"),
};

/// Trimmed title, or `EmptyTitle` when nothing is left.
pub fn validate_title(title: &str) -> AppResult<&str> {
    let t = title.trim();
    if t.is_empty() {
        return Err(AppError::EmptyTitle);
    }
    Ok(t)
}

/// Manual entry and edit: `MIN_DATE <= date <= today`.
pub fn validate_manual_date(date: NaiveDate, today: NaiveDate) -> AppResult<NaiveDate> {
    if date < MIN_DATE || date > today {
        return Err(AppError::DateOutOfRange {
            date,
            min: MIN_DATE,
            max: today,
        });
    }
    Ok(date)
}

/// Import: only the lower bound applies.
pub fn is_importable_date(date: NaiveDate) -> bool {
    date >= MIN_DATE
}
