use crate::core::session::Session;
use crate::core::validate::{validate_manual_date, validate_title};
use crate::errors::AppResult;
use crate::models::event::EventId;
use crate::models::image::ImageData;
use chrono::NaiveDate;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate title and date range, then append the event.
    ///
    /// Manual entry does not look for an existing event with the same
    /// title and date; only imports suppress duplicates.
    pub fn apply(
        session: &mut Session,
        title: &str,
        date: NaiveDate,
        image: Option<ImageData>,
        today: NaiveDate,
    ) -> AppResult<EventId> {
        validate_title(title)?;
        validate_manual_date(date, today)?;

        let ev = session.store.add(title, date, image)?;
        Ok(ev.id.clone())
    }
}
