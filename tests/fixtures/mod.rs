// Test fixtures - reusable test data
// Provides consistent dates and events across integration tests

#![allow(dead_code)]

use calendar_widget::models::event::{Event, EventId, NewEvent};
use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 15 2025
    pub fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// `hour:minute` on Jan `day`, 2025
    pub fn jan(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn with_id(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        NewEvent::new(id, start, end).with_id(EventId::from(id))
    }

    /// A (09:00-09:30) and B (09:15-10:00) overlap, C (11:00-11:30) stands alone.
    pub fn overlapping_morning() -> Vec<Event> {
        vec![
            with_id("A", dates::jan(15, 9, 0), dates::jan(15, 9, 30)),
            with_id("B", dates::jan(15, 9, 15), dates::jan(15, 10, 0)),
            with_id("C", dates::jan(15, 11, 0), dates::jan(15, 11, 30)),
        ]
    }

    /// Jan 14 18:00 to Jan 16 06:00.
    pub fn overnight_trip() -> Event {
        with_id("trip", dates::jan(14, 18, 0), dates::jan(16, 6, 0))
    }

    /// Creation payload for a one-hour meeting on Jan 15.
    pub fn team_meeting() -> NewEvent {
        NewEvent::new("Team Meeting", dates::jan(15, 14, 0), dates::jan(15, 15, 0))
            .description("Weekly sync")
            .category("Work")
            .color("#10b981")
    }
}
