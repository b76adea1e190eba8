// src/export/model.rs

use crate::models::event::Event;
use serde::{Deserialize, Serialize};

/// Flat projection of an event, one per exported row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    pub eventname: String,
    /// ISO `YYYY-MM-DD`.
    pub eventdate: String,
    /// Base64 image payload, empty when the event has none.
    pub image: String,
}

/// Project events into export rows, keeping the order given. Callers pass
/// `EventStore::list_sorted()` to get chronological output.
pub fn export_rows(events: &[&Event]) -> Vec<ExportRow> {
    events
        .iter()
        .map(|ev| ExportRow {
            eventname: ev.title.clone(),
            eventdate: ev.date_str(),
            image: ev.image.as_ref().map(|i| i.to_base64()).unwrap_or_default(),
        })
        .collect()
}

/// Column headers shared by CSV / XLSX.
pub(crate) fn get_headers() -> [&'static str; 3] {
    ["eventname", "eventdate", "image"]
}
