use super::settings::ViewSettings;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SAVE_POINT_VERSION: &str = "1.0";

/// Metadata block of a save point document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveInfo {
    pub name: String,
    #[serde(default = "unknown")]
    pub created_at: String, // RFC 3339
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub event_count: usize,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn default_version() -> String {
    SAVE_POINT_VERSION.to_string()
}

/// Event as written in a save point: the image lives in a sibling file
/// referenced by `image_file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
}

/// On-disk layout of `<name>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePointDocument {
    pub save_info: SaveInfo,
    #[serde(default)]
    pub events: Vec<StoredEvent>,
    #[serde(default)]
    pub settings: ViewSettings,
    #[serde(default)]
    pub image_files: BTreeMap<String, String>,
}

/// One row of the save point listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePointSummary {
    /// File-name stem, used to load or delete.
    pub name: String,
    pub created_at: String,
    pub event_count: usize,
    /// Name recorded inside the document.
    pub title: String,
}

/// Result of a successful `create`.
#[derive(Debug, Clone)]
pub struct SavePointHandle {
    pub name: String,
    pub path: PathBuf,
    pub images: Vec<PathBuf>,
}
