//! Pure event-collection transitions.
//!
//! `reduce` maps (collection, command) to a new collection and never touches
//! its input, so a snapshot handed to a renderer stays valid while the store
//! moves on.

use chrono::NaiveDateTime;

use super::error::StoreError;
use crate::models::event::{Event, EventId, EventPatch};

/// A mutation of the event collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EventCommand {
    /// Append an event that already carries its identifier.
    Add(Event),
    Update { id: EventId, patch: EventPatch },
    Delete(EventId),
    /// Rewrite both instants, as produced by drag-rescheduling.
    Move {
        id: EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Swap in a whole collection, e.g. after loading from storage.
    Replace(Vec<Event>),
}

impl EventCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EventCommand::Add(_) => "add",
            EventCommand::Update { .. } => "update",
            EventCommand::Delete(_) => "delete",
            EventCommand::Move { .. } => "move",
            EventCommand::Replace(_) => "replace",
        }
    }
}

/// Apply `command` to `events`, returning the next collection.
///
/// Commands addressing an unknown identifier fail with
/// [`StoreError::NotFound`]; the caller keeps its current collection.
pub fn reduce(events: &[Event], command: EventCommand) -> Result<Vec<Event>, StoreError> {
    match command {
        EventCommand::Add(event) => {
            let mut next = Vec::with_capacity(events.len() + 1);
            next.extend_from_slice(events);
            next.push(event);
            Ok(next)
        }
        EventCommand::Update { id, patch } => replace_one(events, &id, |e| e.patched(&patch)),
        EventCommand::Move { id, start, end } => {
            let patch = EventPatch::reschedule(start, end);
            replace_one(events, &id, |e| e.patched(&patch))
        }
        EventCommand::Delete(id) => {
            if !events.iter().any(|e| e.id == id) {
                return Err(StoreError::NotFound(id));
            }
            Ok(events.iter().filter(|e| e.id != id).cloned().collect())
        }
        EventCommand::Replace(next) => Ok(next),
    }
}

fn replace_one(
    events: &[Event],
    id: &EventId,
    apply: impl Fn(&Event) -> Event,
) -> Result<Vec<Event>, StoreError> {
    let position = events
        .iter()
        .position(|e| &e.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    let mut next = events.to_vec();
    next[position] = apply(&events[position]);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample(id: &str, title: &str) -> Event {
        NewEvent::new(title, at(9), at(10)).with_id(EventId::from(id))
    }

    #[test]
    fn test_add_appends_without_touching_input() {
        let events = vec![sample("a", "First")];
        let next = reduce(&events, EventCommand::Add(sample("b", "Second"))).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].title, "Second");
    }

    #[test]
    fn test_update_preserves_position() {
        let events = vec![sample("a", "First"), sample("b", "Second"), sample("c", "Third")];
        let command = EventCommand::Update {
            id: EventId::from("b"),
            patch: EventPatch::default().title("Renamed"),
        };

        let next = reduce(&events, command).unwrap();
        let titles: Vec<_> = next.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Renamed", "Third"]);
        assert_eq!(events[1].title, "Second");
    }

    #[test]
    fn test_move_rewrites_both_instants() {
        let events = vec![sample("a", "First")];
        let command = EventCommand::Move {
            id: EventId::from("a"),
            start: at(14),
            end: at(16),
        };

        let next = reduce(&events, command).unwrap();
        assert_eq!(next[0].start, at(14));
        assert_eq!(next[0].end, at(16));
        assert_eq!(next[0].title, "First");
    }

    #[test]
    fn test_delete_removes_only_target() {
        let events = vec![sample("a", "First"), sample("b", "Second")];
        let next = reduce(&events, EventCommand::Delete(EventId::from("a"))).unwrap();
        assert_eq!(next, vec![sample("b", "Second")]);
    }

    #[test]
    fn test_unknown_id_is_reported() {
        let events = vec![sample("a", "First")];
        let missing = EventId::from("zzz");

        assert_eq!(
            reduce(&events, EventCommand::Delete(missing.clone())),
            Err(StoreError::NotFound(missing.clone()))
        );
        assert_eq!(
            reduce(
                &events,
                EventCommand::Move {
                    id: missing.clone(),
                    start: at(1),
                    end: at(2)
                }
            ),
            Err(StoreError::NotFound(missing))
        );
    }

    #[test]
    fn test_replace_swaps_collection() {
        let events = vec![sample("a", "First")];
        let next = reduce(&events, EventCommand::Replace(vec![])).unwrap();
        assert!(next.is_empty());
    }
}
