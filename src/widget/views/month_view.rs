use chrono::NaiveDate;

use super::buckets::DayBuckets;
use super::grid::{self, DAYS_PER_WEEK};
use crate::models::event::Event;
use crate::models::settings::CalendarConfig;
use crate::utils::date::{self, DayKey};

/// One day cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell<'a> {
    pub day: DayKey,
    /// False for padding days from the adjacent months.
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Events occupying this day, ordered by start.
    pub events: Vec<&'a Event>,
    max_visible: usize,
}

impl<'a> GridCell<'a> {
    /// Events that fit in the cell.
    pub fn visible_events(&self) -> &[&'a Event] {
        &self.events[..self.events.len().min(self.max_visible)]
    }

    /// Events hidden behind a "+N more" affordance.
    pub fn overflow_count(&self) -> usize {
        self.events.len().saturating_sub(self.max_visible)
    }

    /// e.g. `"Wed Jan 15 2025. 2 events."`
    pub fn accessible_label(&self) -> String {
        format!("{}. {} events.", self.day.format("%a %b %d %Y"), self.events.len())
    }
}

/// Render model for the month view.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthModel<'a> {
    pub reference: NaiveDate,
    pub weekday_labels: [&'static str; DAYS_PER_WEEK],
    /// 42 cells, row-major.
    pub cells: Vec<GridCell<'a>>,
}

impl<'a> MonthModel<'a> {
    pub fn build(
        reference: NaiveDate,
        events: &'a [Event],
        today: DayKey,
        selected: Option<DayKey>,
        config: &CalendarConfig,
    ) -> Self {
        let days = grid::month_grid(reference, config.week_start);
        let (first, last) = (days[0], days[days.len() - 1]);

        let mut ordered: Vec<&'a Event> = events.iter().collect();
        ordered.sort_by_key(|event| event.start);
        let buckets = DayBuckets::build_within(ordered, first, last);

        let cells = days
            .iter()
            .map(|&day| GridCell {
                day,
                in_current_month: date::is_same_month(day, reference),
                is_today: day == today,
                is_selected: selected == Some(day),
                events: buckets.get(day).to_vec(),
                max_visible: config.max_events_per_cell,
            })
            .collect();

        Self {
            reference,
            weekday_labels: grid::weekday_labels(config.week_start),
            cells,
        }
    }

    /// Cells grouped into weeks.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn cell(&self, day: DayKey) -> Option<&GridCell<'a>> {
        self.cells.iter().find(|cell| cell.day == day)
    }

    /// e.g. `"January 2025"`
    pub fn title(&self) -> String {
        self.reference.format("%B %Y").to_string()
    }
}
