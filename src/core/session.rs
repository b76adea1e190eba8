use crate::core::store::EventStore;
use crate::models::settings::ViewSettings;
use crate::models::view_mode::ViewMode;

/// Everything one editing session owns: the events and how they are shown.
///
/// Built once per invocation (from defaults or from the local snapshot) and
/// passed explicitly to every operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub store: EventStore,
    pub settings: ViewSettings,
}

impl Session {
    /// Empty session using the configured layout for new timelines.
    pub fn new(default_view: ViewMode) -> Self {
        Self {
            store: EventStore::new(),
            settings: ViewSettings::with_view(default_view),
        }
    }

    pub fn with_parts(store: EventStore, settings: ViewSettings) -> Self {
        Self { store, settings }
    }

    /// Drop all events and go back to default settings.
    pub fn reset(&mut self, default_view: ViewMode) {
        *self = Self::new(default_view);
    }
}
