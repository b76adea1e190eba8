use super::view_mode::ViewMode;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DEFAULT_TITLE: &str = "Interactive Event Timeline with Lens Magnifier";

pub const FONTS: [&str; 8] = [
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Georgia",
    "Verdana",
    "Courier New",
    "Impact",
    "Comic Sans MS",
];

pub const TITLE_SIZE_RANGE: RangeInclusive<u32> = 8..=24;
pub const DATE_SIZE_RANGE: RangeInclusive<u32> = 6..=18;
pub const LENS_SIZE_RANGE: RangeInclusive<u32> = 120..=400;
pub const LENS_DURATION_RANGE: RangeInclusive<f64> = 0.0..=3.0;

/// Presentation settings persisted alongside the events.
///
/// Every field has a default so partial documents written by older
/// versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default = "default_title")]
    pub timeline_title: String,
    #[serde(default)]
    pub timeline_view: ViewMode,
    #[serde(default = "default_bg_color")]
    pub timeline_bg_color: String,
    #[serde(default = "default_text_color")]
    pub event_title_color: String,
    #[serde(default = "default_font")]
    pub event_title_font: String,
    #[serde(default = "default_title_size")]
    pub event_title_size: u32,
    #[serde(default = "default_text_color")]
    pub event_date_color: String,
    #[serde(default = "default_font")]
    pub event_date_font: String,
    #[serde(default = "default_date_size")]
    pub event_date_size: u32,
    #[serde(default = "default_lens_size")]
    pub lens_size: u32,
    #[serde(default = "default_lens_duration")]
    pub lens_duration: f64,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_bg_color() -> String {
    "#fefcea".to_string()
}
fn default_text_color() -> String {
    "#ffffff".to_string()
}
fn default_font() -> String {
    "Arial".to_string()
}
fn default_title_size() -> u32 {
    12
}
fn default_date_size() -> u32 {
    10
}
fn default_lens_size() -> u32 {
    240
}
fn default_lens_duration() -> f64 {
    0.5
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            timeline_title: default_title(),
            timeline_view: ViewMode::default(),
            timeline_bg_color: default_bg_color(),
            event_title_color: default_text_color(),
            event_title_font: default_font(),
            event_title_size: default_title_size(),
            event_date_color: default_text_color(),
            event_date_font: default_font(),
            event_date_size: default_date_size(),
            lens_size: default_lens_size(),
            lens_duration: default_lens_duration(),
        }
    }
}

impl ViewSettings {
    pub const KEYS: [&'static str; 11] = [
        "timeline_title",
        "timeline_view",
        "timeline_bg_color",
        "event_title_color",
        "event_title_font",
        "event_title_size",
        "event_date_color",
        "event_date_font",
        "event_date_size",
        "lens_size",
        "lens_duration",
    ];

    /// Defaults for a brand-new session with the configured layout.
    pub fn with_view(view: ViewMode) -> Self {
        Self {
            timeline_view: view,
            ..Self::default()
        }
    }

    /// Set a single field from user input, enforcing the same bounds the
    /// editor controls offer.
    pub fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let value = value.trim();
        match key {
            "timeline_title" => self.timeline_title = value.to_string(),
            "timeline_view" => {
                self.timeline_view = ViewMode::vm_from_str(value).ok_or_else(|| {
                    AppError::InvalidSetting(format!(
                        "timeline_view must be one of: {}",
                        ViewMode::ALL.map(|m| m.as_str()).join(", ")
                    ))
                })?
            }
            "timeline_bg_color" => self.timeline_bg_color = parse_color(key, value)?,
            "event_title_color" => self.event_title_color = parse_color(key, value)?,
            "event_date_color" => self.event_date_color = parse_color(key, value)?,
            "event_title_font" => self.event_title_font = parse_font(key, value)?,
            "event_date_font" => self.event_date_font = parse_font(key, value)?,
            "event_title_size" => self.event_title_size = parse_in_range(key, value, TITLE_SIZE_RANGE)?,
            "event_date_size" => self.event_date_size = parse_in_range(key, value, DATE_SIZE_RANGE)?,
            "lens_size" => self.lens_size = parse_in_range(key, value, LENS_SIZE_RANGE)?,
            "lens_duration" => {
                self.lens_duration = parse_in_range(key, value, LENS_DURATION_RANGE)?
            }
            other => {
                return Err(AppError::InvalidSetting(format!(
                    "unknown key '{other}' (valid keys: {})",
                    Self::KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn parse_color(key: &str, value: &str) -> AppResult<String> {
    let hex = value.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(value.to_lowercase())
    } else {
        Err(AppError::InvalidSetting(format!(
            "{key} must be a color like #1a2b3c, got '{value}'"
        )))
    }
}

fn parse_font(key: &str, value: &str) -> AppResult<String> {
    FONTS
        .iter()
        .find(|f| f.eq_ignore_ascii_case(value))
        .map(|f| f.to_string())
        .ok_or_else(|| {
            AppError::InvalidSetting(format!("{key} must be one of: {}", FONTS.join(", ")))
        })
}

fn parse_in_range<T>(key: &str, value: &str, range: RangeInclusive<T>) -> AppResult<T>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
    let v: T = value
        .parse()
        .map_err(|_| AppError::InvalidSetting(format!("{key} must be a number, got '{value}'")))?;
    if range.contains(&v) {
        Ok(v)
    } else {
        Err(AppError::InvalidSetting(format!(
            "{key} must be between {} and {}, got {v}",
            range.start(),
            range.end()
        )))
    }
}
