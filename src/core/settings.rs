use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::settings::ViewSettings;
use crate::models::view_mode::ViewMode;

pub struct SettingsLogic;

impl SettingsLogic {
    /// Apply every `key=value` pair or none of them.
    pub fn apply(session: &mut Session, pairs: &[(String, String)]) -> AppResult<()> {
        let mut next = session.settings.clone();
        for (key, value) in pairs {
            next.set(key, value)?;
        }
        session.settings = next;
        Ok(())
    }

    pub fn reset(session: &mut Session, default_view: ViewMode) {
        session.settings = ViewSettings::with_view(default_view);
    }

    /// `(key, value)` rows in declaration order, for display.
    pub fn rows(settings: &ViewSettings) -> Vec<(&'static str, String)> {
        vec![
            ("timeline_title", settings.timeline_title.clone()),
            ("timeline_view", settings.timeline_view.to_string()),
            ("timeline_bg_color", settings.timeline_bg_color.clone()),
            ("event_title_color", settings.event_title_color.clone()),
            ("event_title_font", settings.event_title_font.clone()),
            ("event_title_size", settings.event_title_size.to_string()),
            ("event_date_color", settings.event_date_color.clone()),
            ("event_date_font", settings.event_date_font.clone()),
            ("event_date_size", settings.event_date_size.to_string()),
            ("lens_size", settings.lens_size.to_string()),
            ("lens_duration", format!("{:.1}", settings.lens_duration)),
        ]
    }
}

/// Split a `KEY=VALUE` argument.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(AppError::InvalidSetting("empty key".into()).to_string());
    }
    Ok((k.to_string(), v.to_string()))
}
