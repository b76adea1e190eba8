//! Ephemeral snapshot: the session mirrored into a client-local key-value
//! store under two fixed keys, refreshed after every mutation.

use crate::core::session::Session;
use crate::core::store::EventStore;
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::settings::ViewSettings;
use crate::models::view_mode::ViewMode;
use crate::persist::kv::KeyValueStore;
use std::thread;
use std::time::Duration;

pub const EVENTS_KEY: &str = "timeline_events";
pub const SETTINGS_KEY: &str = "timeline_settings";

/// Pause before the second load attempt.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

/// What happened to one half of the snapshot on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartStatus {
    Restored,
    Absent,
    /// Present but unreadable; defaults were used instead.
    Corrupt,
}

#[derive(Debug, Clone)]
pub struct Restored {
    pub session: Session,
    pub events: PartStatus,
    pub settings: PartStatus,
}

impl Restored {
    pub fn is_empty(&self) -> bool {
        self.events != PartStatus::Restored && self.settings != PartStatus::Restored
    }
}

pub struct SnapshotGateway<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> SnapshotGateway<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    pub fn into_inner(self) -> K {
        self.kv
    }

    /// Write events and settings as two independent JSON blobs.
    /// Output depends only on the session, so unchanged state produces
    /// identical bytes.
    pub fn save(&mut self, session: &Session) -> AppResult<()> {
        let events_json = serde_json::to_string(session.store.all())?;
        let settings_json = serde_json::to_string(&session.settings)?;

        self.kv.set(EVENTS_KEY, &events_json)?;
        self.kv.set(SETTINGS_KEY, &settings_json)?;
        Ok(())
    }

    /// Read both halves back. A missing or malformed half falls back to its
    /// defaults without affecting the other one; only a failing key-value
    /// store is reported as an error.
    pub fn load(&self, fresh_view: ViewMode) -> AppResult<Restored> {
        let raw_events = self.kv.get(EVENTS_KEY)?;
        let raw_settings = self.kv.get(SETTINGS_KEY)?;

        let (store, events) = match raw_events {
            None => (EventStore::new(), PartStatus::Absent),
            Some(text) => match decode_events(&text) {
                Some(store) => (store, PartStatus::Restored),
                None => (EventStore::new(), PartStatus::Corrupt),
            },
        };

        let (settings, settings_status) = match raw_settings {
            None => (ViewSettings::with_view(fresh_view), PartStatus::Absent),
            Some(text) => match serde_json::from_str::<ViewSettings>(&text) {
                Ok(s) => (s, PartStatus::Restored),
                Err(_) => (ViewSettings::with_view(fresh_view), PartStatus::Corrupt),
            },
        };

        Ok(Restored {
            session: Session::with_parts(store, settings),
            events,
            settings: settings_status,
        })
    }

    /// `load`, retried once after `delay` if the store could not be read.
    pub fn load_with_retry(&self, fresh_view: ViewMode, delay: Duration) -> AppResult<Restored> {
        match self.load(fresh_view) {
            Ok(r) => Ok(r),
            Err(_) => {
                thread::sleep(delay);
                self.load(fresh_view)
            }
        }
    }

    pub fn clear(&mut self) -> AppResult<()> {
        self.kv.remove(EVENTS_KEY)?;
        self.kv.remove(SETTINGS_KEY)?;
        Ok(())
    }
}

fn decode_events(text: &str) -> Option<EventStore> {
    let events: Vec<Event> = serde_json::from_str(text).ok()?;
    EventStore::from_events(events).ok()
}
