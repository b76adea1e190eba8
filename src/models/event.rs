use super::image::ImageData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque event identifier.
///
/// New ids are UUID v4 strings; any text id found in an older document is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to identify an event from the CLI.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((i, _)) => &self.0[..i],
            None => &self.0,
        }
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate, // ISO "YYYY-MM-DD" in every document
    #[serde(default)]
    pub image: Option<ImageData>,
}

impl Event {
    /// Builds an event with a freshly generated id.
    pub fn new(title: impl Into<String>, date: NaiveDate, image: Option<ImageData>) -> Self {
        Self {
            id: EventId::generate(),
            title: title.into(),
            date,
            image,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Normalized `(title, date)` pair used for duplicate suppression.
    pub fn dedup_key(&self) -> (String, String) {
        dedup_key(&self.title, self.date)
    }
}

pub fn dedup_key(title: &str, date: NaiveDate) -> (String, String) {
    (
        title.to_lowercase().trim().to_string(),
        date.format("%Y-%m-%d").to_string(),
    )
}

/// Constructor arguments for an event that does not exist yet
/// (produced by the import adapter, consumed by the store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub image: Option<ImageData>,
}

impl NewEvent {
    pub fn into_event(self) -> Event {
        Event::new(self.title, self.date, self.image)
    }
}
