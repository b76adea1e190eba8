//! In-memory event collection for the active session.

use crate::core::validate::validate_title;
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, EventId, NewEvent};
use crate::models::image::ImageData;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Shortest prefix accepted by `resolve`.
const MIN_PREFIX_LEN: usize = 4;

/// Events in insertion order. Sorting happens on read so ties keep the
/// order in which events were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted list. Duplicate ids mean the
    /// document was tampered with or truncated.
    pub fn from_events(events: Vec<Event>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for ev in &events {
            if !seen.insert(ev.id.as_str()) {
                return Err(AppError::Corrupt(format!("duplicate event id '{}'", ev.id)));
            }
        }
        Ok(Self { events })
    }

    /// Add an event with a fresh id. The date is not range-checked here:
    /// callers validate it first (see `AddLogic`).
    pub fn add(
        &mut self,
        title: &str,
        date: NaiveDate,
        image: Option<ImageData>,
    ) -> AppResult<&Event> {
        let title = validate_title(title)?;
        self.events.push(Event::new(title, date, image));
        let idx = self.events.len() - 1;
        Ok(&self.events[idx])
    }

    /// Overwrite title, date and image of an existing event.
    pub fn edit(
        &mut self,
        id: &EventId,
        title: &str,
        date: NaiveDate,
        image: Option<ImageData>,
    ) -> AppResult<()> {
        let ev = self
            .events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| AppError::EventNotFound(id.to_string()))?;

        ev.title = title.to_string();
        ev.date = date;
        ev.image = image;
        Ok(())
    }

    pub fn delete(&mut self, id: &EventId) -> AppResult<Event> {
        let idx = self
            .events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| AppError::EventNotFound(id.to_string()))?;
        Ok(self.events.remove(idx))
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Look up an event by full id or by a unique id prefix.
    pub fn resolve(&self, id_or_prefix: &str) -> AppResult<&Event> {
        let needle = id_or_prefix.trim();

        if let Some(ev) = self.events.iter().find(|e| e.id.as_str() == needle) {
            return Ok(ev);
        }
        if needle.len() < MIN_PREFIX_LEN {
            return Err(AppError::EventNotFound(needle.to_string()));
        }

        let mut matches = self
            .events
            .iter()
            .filter(|e| e.id.as_str().starts_with(needle));

        match (matches.next(), matches.next()) {
            (Some(ev), None) => Ok(ev),
            (Some(_), Some(_)) => Err(AppError::AmbiguousEventId(needle.to_string())),
            _ => Err(AppError::EventNotFound(needle.to_string())),
        }
    }

    /// Ascending by date; equal dates keep insertion order.
    pub fn list_sorted(&self) -> Vec<&Event> {
        let mut out: Vec<&Event> = self.events.iter().collect();
        out.sort_by_key(|e| e.date); // stable
        out
    }

    /// Insertion-order view.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// Normalized `(title, date)` keys of every stored event.
    pub fn keys(&self) -> HashSet<(String, String)> {
        self.events.iter().map(Event::dedup_key).collect()
    }

    /// Append new events in the given order, returning how many were added.
    pub fn extend(&mut self, new_events: Vec<NewEvent>) -> usize {
        let n = new_events.len();
        self.events
            .extend(new_events.into_iter().map(NewEvent::into_event));
        n
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
