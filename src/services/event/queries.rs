use super::EventStore;
use crate::models::event::{Event, EventId};
use crate::utils::date::DayKey;

impl EventStore {
    /// Retrieve an event by ID.
    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events().iter().find(|event| &event.id == id)
    }

    /// Events occupying `day`, in collection order.
    pub fn events_on(&self, day: DayKey) -> Vec<&Event> {
        self.events()
            .iter()
            .filter(|event| event.occupies_any(day, day))
            .collect()
    }

    /// Search events by title, description, or category.
    pub fn search(&self, query: &str) -> Vec<&Event> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let matches = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };

        let mut found: Vec<&Event> = self
            .events()
            .iter()
            .filter(|event| {
                matches(Some(&event.title))
                    || matches(event.description.as_deref())
                    || matches(event.category.as_deref())
            })
            .collect();
        found.sort_by_key(|event| event.start);
        found
    }

    /// List every event ordered by start (stable for equal starts).
    pub fn sorted_by_start(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events().iter().collect();
        events.sort_by_key(|event| event.start);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn store() -> EventStore {
        EventStore::new(vec![
            NewEvent::new("Standup", at(15, 9), at(15, 10))
                .category("Work")
                .with_id(EventId::from("a")),
            NewEvent::new("Dentist", at(14, 8), at(14, 9))
                .description("Bring insurance card")
                .with_id(EventId::from("b")),
            NewEvent::new("Conference", at(14, 18), at(16, 12))
                .category("work")
                .with_id(EventId::from("c")),
        ])
    }

    #[test]
    fn test_get_event() {
        let store = store();
        assert_eq!(store.get(&EventId::from("b")).unwrap().title, "Dentist");
        assert!(store.get(&EventId::from("x")).is_none());
    }

    #[test]
    fn test_events_on_includes_multi_day() {
        let store = store();
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let titles: Vec<_> = store.events_on(day).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Standup", "Conference"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let store = store();
        let titles: Vec<_> = store.search("WORK").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Conference", "Standup"]);

        assert_eq!(store.search("insurance").len(), 1);
        assert!(store.search("   ").is_empty());
    }

    #[test]
    fn test_sorted_by_start() {
        let store = store();
        let ids: Vec<_> = store.sorted_by_start().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
