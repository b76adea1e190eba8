use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Timeline layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Linear scroll with the magnifying lens.
    #[default]
    Timeline,
    /// Cascading card layout.
    Domino,
}

/// Historical view names and the layout that replaced them.
const LEGACY_NAMES: &[(&str, ViewMode)] = &[("orbit", ViewMode::Domino)];

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Timeline, ViewMode::Domino];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Timeline => "Timeline",
            ViewMode::Domino => "Domino",
        }
    }

    /// Strict parse of a current view name (case-insensitive).
    pub fn vm_from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
    }

    /// Convert a stored value into a current view mode.
    ///
    /// Current names map to themselves, retired names go through
    /// `LEGACY_NAMES`, anything else (including empty) falls back to
    /// `Timeline`.
    pub fn from_stored(s: &str) -> Self {
        if let Some(m) = Self::vm_from_str(s) {
            return m;
        }
        let lower = s.trim().to_lowercase();
        LEGACY_NAMES
            .iter()
            .find(|(old, _)| *old == lower)
            .map(|(_, new)| *new)
            .unwrap_or(ViewMode::Timeline)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ViewMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values are treated like an unknown name.
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .map(ViewMode::from_stored)
            .unwrap_or(ViewMode::Timeline))
    }
}
