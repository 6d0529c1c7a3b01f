// Event module
// Calendar event record, creation payload and partial updates

mod instant;

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::date::{self, DayKey};

/// Opaque, unique event identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh identifier (random UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Calendar event as owned by the event store.
///
/// Instants are local wall-clock values. `end` is exclusive. An event whose
/// `end` precedes its `start` is tolerated: every derived view treats it as
/// zero-length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "startDate", with = "instant")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDate", with = "instant")]
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Event {
    /// End clamped so it never precedes start.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.max(self.start)
    }

    /// True when `end < start`.
    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }

    /// Get the duration of the event (zero for malformed events)
    pub fn duration(&self) -> Duration {
        self.effective_end() - self.start
    }

    /// Day the event starts on.
    pub fn first_day(&self) -> DayKey {
        date::day_key(self.start)
    }

    /// Last day the event occupies.
    ///
    /// An event ending exactly at midnight does not occupy the day that
    /// midnight opens, unless it also starts there.
    pub fn last_day(&self) -> DayKey {
        let end = self.effective_end();
        let end_day = date::day_key(end);
        if end > self.start && end == date::start_of_day(end_day) {
            end_day.pred_opt().unwrap_or(end_day)
        } else {
            end_day
        }
    }

    /// Every day the event occupies, in order.
    pub fn days_spanned(&self) -> impl Iterator<Item = DayKey> {
        date::days_inclusive(self.first_day(), self.last_day())
    }

    /// Whether the event occupies any day within `first..=last`.
    pub fn occupies_any(&self, first: DayKey, last: DayKey) -> bool {
        self.first_day() <= last && self.last_day() >= first
    }

    /// Apply a partial update, returning the updated copy.
    pub fn patched(&self, patch: &EventPatch) -> Event {
        let mut event = self.clone();
        if let Some(title) = &patch.title {
            event.title = title.clone();
        }
        if let Some(description) = &patch.description {
            event.description = description.clone();
        }
        if let Some(start) = patch.start {
            event.start = start;
        }
        if let Some(end) = patch.end {
            event.end = end;
        }
        if let Some(color) = &patch.color {
            event.color = color.clone();
        }
        if let Some(category) = &patch.category {
            event.category = category.clone();
        }
        event
    }
}

/// An event that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl NewEvent {
    /// Create a creation payload with the required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_widget::models::event::NewEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = NewEvent::new("Team Meeting", start, end).category("Work");
    /// assert_eq!(event.category.as_deref(), Some("Work"));
    /// ```
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            color: None,
            category: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach an identifier, producing a storable event.
    pub fn with_id(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            color: self.color,
            category: self.category,
        }
    }
}

/// Partial update. `None` leaves a field untouched; for optional fields
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub color: Option<Option<String>>,
    pub category: Option<Option<String>>,
}

impl EventPatch {
    /// Patch that rewrites both instants.
    pub fn reschedule(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
