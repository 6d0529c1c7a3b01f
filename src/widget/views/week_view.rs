use chrono::{NaiveDate, NaiveDateTime};

use super::buckets::DayBuckets;
use super::grid::{self, DAYS_PER_WEEK};
use super::layout::{layout_days, LayoutOptions, PositionedEvent};
use crate::models::event::Event;
use crate::models::settings::CalendarConfig;
use crate::utils::date::{self, DayKey};

/// Render model for the week view: seven day columns of time slots.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekModel<'a> {
    pub days: [DayKey; DAYS_PER_WEEK],
    pub weekday_labels: [&'static str; DAYS_PER_WEEK],
    /// Positioned events for the whole week, grouped by day index.
    pub events: Vec<PositionedEvent<'a>>,
    pub slot_minutes: u32,
    pub today: DayKey,
}

impl<'a> WeekModel<'a> {
    pub fn build(
        reference: NaiveDate,
        events: &'a [Event],
        today: DayKey,
        config: &CalendarConfig,
    ) -> Self {
        let days = grid::week_range(reference, config.week_start);
        let buckets = DayBuckets::build_within(events, days[0], days[DAYS_PER_WEEK - 1]);
        let positioned = layout_days(&buckets, &days, LayoutOptions::from(config));

        Self {
            days,
            weekday_labels: grid::weekday_labels(config.week_start),
            events: positioned,
            slot_minutes: config.slot_minutes,
            today,
        }
    }

    pub fn slots_per_day(&self) -> u32 {
        date::MINUTES_PER_DAY / self.slot_minutes.max(1)
    }

    /// `HH:MM` label for every slot of a day.
    pub fn slot_labels(&self) -> Vec<String> {
        (0..self.slots_per_day())
            .map(|slot| {
                let minutes = slot * self.slot_minutes;
                format!("{:02}:{:02}", minutes / 60, minutes % 60)
            })
            .collect()
    }

    pub fn events_for_day(&self, day_index: usize) -> impl Iterator<Item = &PositionedEvent<'a>> {
        self.events
            .iter()
            .filter(move |positioned| positioned.day_index == day_index)
    }

    pub fn is_today(&self, day_index: usize) -> bool {
        self.days.get(day_index) == Some(&self.today)
    }

    /// Instant at which `slot` begins on the given day column.
    ///
    /// `slot == slots_per_day()` is accepted and maps to the following
    /// midnight, so it can serve as an exclusive range end.
    pub fn slot_start(&self, day_index: usize, slot: u32) -> Option<NaiveDateTime> {
        let day = *self.days.get(day_index)?;
        if slot > self.slots_per_day() {
            return None;
        }
        Some(date::at_minute(day, slot * self.slot_minutes))
    }

    /// e.g. `"Jan 12 - Jan 18, 2025"`
    pub fn title(&self) -> String {
        let (first, last) = (self.days[0], self.days[DAYS_PER_WEEK - 1]);
        format!("{} - {}", first.format("%b %-d"), last.format("%b %-d, %Y"))
    }
}
