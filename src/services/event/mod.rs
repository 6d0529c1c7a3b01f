//! Calendar event store entry point.
//! Holds the authoritative event collection as a copy-on-write snapshot and
//! routes every mutation through the pure reducer.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::models::event::{Event, EventId, EventPatch, NewEvent};

mod error;
pub mod queries;
pub mod reducer;

pub use error::StoreError;
pub use reducer::{reduce, EventCommand};

/// In-memory owner of the canonical event collection.
///
/// Readers take a [`snapshot`](Self::snapshot); mutations build a new
/// collection and swap it in, so earlier snapshots never change.
#[derive(Debug, Clone)]
pub struct EventStore {
    events: Arc<[Event]>,
    revision: u64,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl EventStore {
    /// Create a store seeded with an initial collection
    pub fn new(initial: Vec<Event>) -> Self {
        Self {
            events: Arc::from(initial),
            revision: 0,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Shared handle to the current collection.
    pub fn snapshot(&self) -> Arc<[Event]> {
        Arc::clone(&self.events)
    }

    /// Incremented on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Apply a command. On error the collection is left as it was.
    pub fn dispatch(&mut self, command: EventCommand) -> Result<(), StoreError> {
        let name = command.name();
        match reduce(&self.events, command) {
            Ok(next) => {
                self.events = Arc::from(next);
                self.revision += 1;
                log::info!(
                    "Event store {}: {} events (revision {})",
                    name,
                    self.events.len(),
                    self.revision
                );
                Ok(())
            }
            Err(err) => {
                log::warn!("Event store {} ignored: {}", name, err);
                Err(err)
            }
        }
    }

    /// Add an event, assigning it a fresh identifier.
    pub fn add(&mut self, new_event: NewEvent) -> Event {
        let event = new_event.with_id(EventId::generate());
        if event.is_malformed() {
            log::warn!("Adding event {} whose end precedes its start", event.id);
        }
        // Add never addresses an existing id, so the reducer cannot fail here.
        let _ = self.dispatch(EventCommand::Add(event.clone()));
        event
    }

    pub fn update(&mut self, id: &EventId, patch: EventPatch) -> Result<(), StoreError> {
        self.dispatch(EventCommand::Update {
            id: id.clone(),
            patch,
        })
    }

    pub fn delete(&mut self, id: &EventId) -> Result<(), StoreError> {
        self.dispatch(EventCommand::Delete(id.clone()))
    }

    /// Reschedule an event to a new start and end.
    pub fn move_event(
        &mut self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<(), StoreError> {
        self.dispatch(EventCommand::Move {
            id: id.clone(),
            start,
            end,
        })
    }

    pub fn replace_all(&mut self, events: Vec<Event>) {
        let _ = self.dispatch(EventCommand::Replace(events));
    }
}
