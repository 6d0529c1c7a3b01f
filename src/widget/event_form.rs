use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::event::{Event, EventId, EventPatch, NewEvent};
use crate::models::settings::CalendarConfig;

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Event title is required")]
    EmptyTitle,

    #[error("Event title is too long (max {MAX_TITLE_LEN} characters)")]
    TitleTooLong,

    #[error("Color must be a hex value such as #3b82f6, got '{0}'")]
    InvalidColor(String),
}

/// Result of a valid form: either a creation payload or an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(NewEvent),
    Update { id: EventId, patch: EventPatch },
}

/// State of the create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    /// Set when editing an existing event.
    pub event_id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub category: String,
}

impl EventDraft {
    /// Blank one-hour draft starting at the beginning of `date`'s working day.
    pub fn new_for_date(date: NaiveDate, config: &CalendarConfig) -> Self {
        let start = date.and_time(NaiveTime::MIN) + Duration::hours(9);
        Self::new_for_range(start, start + Duration::hours(1), config)
    }

    pub fn new_for_range(start: NaiveDateTime, end: NaiveDateTime, config: &CalendarConfig) -> Self {
        Self {
            event_id: None,
            title: String::new(),
            description: String::new(),
            start,
            end,
            color: config.default_color.clone(),
            category: config.default_category.clone(),
        }
    }

    pub fn for_event(event: &Event, config: &CalendarConfig) -> Self {
        Self {
            event_id: Some(event.id.clone()),
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start: event.start,
            end: event.end,
            color: event
                .color
                .clone()
                .unwrap_or_else(|| config.default_color.clone()),
            category: event.category.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.event_id.is_some()
    }

    pub fn validate(&self) -> Result<FormSubmission, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(FormError::TitleTooLong);
        }
        let color = self.color.trim();
        if !is_hex_color(color) {
            return Err(FormError::InvalidColor(color.to_string()));
        }

        let description = non_blank(&self.description);
        let category = non_blank(&self.category);

        Ok(match &self.event_id {
            None => FormSubmission::Create(NewEvent {
                title: title.to_string(),
                description,
                start: self.start,
                end: self.end,
                color: Some(color.to_string()),
                category,
            }),
            Some(id) => FormSubmission::Update {
                id: id.clone(),
                patch: EventPatch {
                    title: Some(title.to_string()),
                    description: Some(description),
                    start: Some(self.start),
                    end: Some(self.end),
                    color: Some(Some(color.to_string())),
                    category: Some(category),
                },
            },
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `#rgb` or `#rrggbb`.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        date().and_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_new_draft_uses_config_defaults() {
        let draft = EventDraft::new_for_date(date(), &CalendarConfig::default());
        assert_eq!(draft.start, at(9, 0));
        assert_eq!(draft.end, at(10, 0));
        assert_eq!(draft.color, "#3b82f6");
        assert_eq!(draft.category, "General");
        assert!(!draft.is_edit());
    }

    #[test]
    fn test_create_submission_trims_fields() {
        let mut draft = EventDraft::new_for_range(at(9, 0), at(9, 30), &CalendarConfig::default());
        draft.title = "  Standup ".to_string();
        draft.description = "   ".to_string();

        let FormSubmission::Create(new_event) = draft.validate().unwrap() else {
            panic!("expected a creation");
        };
        assert_eq!(new_event.title, "Standup");
        assert_eq!(new_event.description, None);
        assert_eq!(new_event.category.as_deref(), Some("General"));
        assert_eq!(new_event.end, at(9, 30));
    }

    #[test]
    fn test_edit_submission_clears_removed_fields() {
        let event = NewEvent::new("Review", at(14, 0), at(15, 0))
            .description("Q1 numbers")
            .category("Work")
            .with_id(EventId::from("evt-7"));
        let mut draft = EventDraft::for_event(&event, &CalendarConfig::default());
        assert_eq!(draft.color, "#3b82f6");
        draft.category.clear();

        let submission = draft.validate().unwrap();
        let FormSubmission::Update { id, patch } = submission else {
            panic!("expected an update");
        };
        assert_eq!(id, EventId::from("evt-7"));
        assert_eq!(patch.category, Some(None));
        assert_eq!(patch.description, Some(Some("Q1 numbers".to_string())));
    }

    #[test_case("", FormError::EmptyTitle ; "empty title")]
    #[test_case("   ", FormError::EmptyTitle ; "blank title")]
    fn test_title_is_required(title: &str, expected: FormError) {
        let mut draft = EventDraft::new_for_date(date(), &CalendarConfig::default());
        draft.title = title.to_string();
        assert_eq!(draft.validate(), Err(expected));
    }

    #[test]
    fn test_title_length_limit() {
        let mut draft = EventDraft::new_for_date(date(), &CalendarConfig::default());
        draft.title = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(draft.validate(), Err(FormError::TitleTooLong));
    }

    #[test_case("#3b82f6", true ; "six digits")]
    #[test_case("#FFF", true ; "three digits")]
    #[test_case("3b82f6", false ; "missing hash")]
    #[test_case("#12345", false ; "five digits")]
    #[test_case("#zzzzzz", false ; "not hex")]
    fn test_hex_color(value: &str, valid: bool) {
        assert_eq!(is_hex_color(value), valid);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut draft = EventDraft::new_for_date(date(), &CalendarConfig::default());
        draft.title = "Lunch".to_string();
        draft.color = "blue".to_string();
        assert_eq!(
            draft.validate(),
            Err(FormError::InvalidColor("blue".to_string()))
        );
    }
}
