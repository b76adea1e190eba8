use crate::core::session::Session;
use crate::core::validate::{validate_manual_date, validate_title};
use crate::errors::{AppError, AppResult};
use crate::models::event::EventId;
use crate::models::image::ImageData;
use chrono::NaiveDate;

/// What to do with the image of an edited event.
#[derive(Debug, Clone, Default)]
pub enum ImageChange {
    #[default]
    Keep,
    Replace(ImageData),
    Remove,
}

/// Field-level edit request; unspecified fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub image: ImageChange,
}

pub struct EditLogic;

impl EditLogic {
    /// Merge `req` with the current event, re-validate title and date
    /// range, then overwrite all mutable fields. Nothing changes on error.
    pub fn apply(
        session: &mut Session,
        id: &EventId,
        req: EditRequest,
        today: NaiveDate,
    ) -> AppResult<()> {
        let current = session
            .store
            .get(id)
            .ok_or_else(|| AppError::EventNotFound(id.to_string()))?;

        let title = match &req.title {
            Some(t) => validate_title(t)?.to_string(),
            None => current.title.clone(),
        };
        let date = validate_manual_date(req.date.unwrap_or(current.date), today)?;
        let image = match req.image {
            ImageChange::Keep => current.image.clone(),
            ImageChange::Replace(img) => Some(img),
            ImageChange::Remove => None,
        };

        session.store.edit(id, &title, date, image)
    }
}
