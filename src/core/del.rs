use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::event::{Event, EventId};

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one event, returning it so the caller can report what went.
    pub fn apply(session: &mut Session, id: &EventId) -> AppResult<Event> {
        session.store.delete(id)
    }
}
