//! Event layout engine for time-grid views.
//!
//! For one day's bucket this computes each event's visible interval (clipped
//! to the day), its vertical top/height as fractions of the day, and a column
//! assignment so that events overlapping in time sit side by side.
//!
//! Column packing is greedy interval colouring: events are swept in start
//! order and each one takes the first column whose last occupant has ended.
//! Ends are compared using the *rendered* duration (after the minimum-length
//! floor), so short events never draw on top of each other.

use chrono::NaiveDateTime;

use super::buckets::DayBuckets;
use crate::models::event::Event;
use crate::models::settings::{CalendarConfig, ColumnPolicy};
use crate::utils::date::{self, DayKey, MINUTES_PER_DAY};

const SECONDS_PER_DAY: i64 = MINUTES_PER_DAY as i64 * 60;

/// Knobs for [`layout_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub min_event_minutes: u32,
    pub column_policy: ColumnPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::from(&CalendarConfig::default())
    }
}

impl From<&CalendarConfig> for LayoutOptions {
    fn from(config: &CalendarConfig) -> Self {
        Self {
            min_event_minutes: config.min_event_minutes,
            column_policy: config.column_policy,
        }
    }
}

/// The part of an event that falls within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedInterval {
    pub day: DayKey,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ClippedInterval {
    pub fn minutes_from_day_start(&self) -> f64 {
        date::minutes_between(date::start_of_day(self.day), self.start)
    }

    pub fn duration_minutes(&self) -> f64 {
        date::minutes_between(self.start, self.end)
    }

    pub fn overlaps(&self, other: &ClippedInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Clip `event` to the 00:00-24:00 bounds of `day`.
///
/// Returns `None` when the event does not occupy `day`. Malformed events
/// (end before start) clip to a zero-length interval at their start.
pub fn clip_to_day(event: &Event, day: DayKey) -> Option<ClippedInterval> {
    if !event.occupies_any(day, day) {
        return None;
    }
    let start = event.start.max(date::start_of_day(day));
    let end = event.effective_end().min(date::end_of_day(day)).max(start);
    Some(ClippedInterval { day, start, end })
}

/// An event positioned within one day column.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent<'a> {
    pub event: &'a Event,
    /// Index of the day within the visible range.
    pub day_index: usize,
    pub interval: ClippedInterval,
    /// Offset from the top of the day, as a fraction of the day.
    pub top: f64,
    /// Rendered height as a fraction of the day (minimum floor applied).
    pub height: f64,
    pub column: usize,
    /// Columns sharing the horizontal space with this event.
    pub columns: usize,
}

impl PositionedEvent<'_> {
    pub fn width(&self) -> f64 {
        1.0 / self.columns.max(1) as f64
    }

    pub fn left(&self) -> f64 {
        self.column as f64 * self.width()
    }

    /// Label for assistive technology, e.g. `"Standup, 09:00 - 09:30"`.
    pub fn accessible_label(&self) -> String {
        format!(
            "{}, {} - {}",
            self.event.title,
            self.event.start.format("%H:%M"),
            self.event.effective_end().format("%H:%M")
        )
    }
}

struct Placement<'a> {
    event: &'a Event,
    interval: ClippedInterval,
    start_secs: i64,
    rendered_secs: i64,
}

impl Placement<'_> {
    fn rendered_end(&self) -> i64 {
        self.start_secs + self.rendered_secs
    }
}

/// Lay out one day's events.
///
/// Output is in visible-start order, ties kept in input order.
pub fn layout_day<'a>(
    events: &[&'a Event],
    day: DayKey,
    day_index: usize,
    options: LayoutOptions,
) -> Vec<PositionedEvent<'a>> {
    let day_start = date::start_of_day(day);
    let floor_secs = i64::from(options.min_event_minutes) * 60;

    let mut placements: Vec<Placement<'a>> = events
        .iter()
        .filter_map(|&event| {
            let interval = clip_to_day(event, day)?;
            if event.is_malformed() {
                log::warn!("Event {} ends before it starts; drawing minimum height", event.id);
            }
            Some(Placement {
                event,
                interval,
                start_secs: (interval.start - day_start).num_seconds(),
                rendered_secs: (interval.end - interval.start).num_seconds().max(floor_secs),
            })
        })
        .collect();

    // Stable: equal starts keep bucket order.
    placements.sort_by_key(|placement| placement.start_secs);

    let mut column_ends: Vec<i64> = Vec::new();
    let mut assigned: Vec<usize> = Vec::with_capacity(placements.len());
    let mut cluster_of: Vec<usize> = Vec::with_capacity(placements.len());
    let mut cluster_widths: Vec<usize> = Vec::new();
    let mut cluster_end = i64::MIN;

    for placement in &placements {
        if placement.start_secs >= cluster_end {
            cluster_widths.push(0);
        }
        cluster_end = cluster_end.max(placement.rendered_end());

        let column = match column_ends
            .iter()
            .position(|&end| end <= placement.start_secs)
        {
            Some(free) => {
                column_ends[free] = placement.rendered_end();
                free
            }
            None => {
                column_ends.push(placement.rendered_end());
                column_ends.len() - 1
            }
        };

        let cluster = cluster_widths.len() - 1;
        cluster_widths[cluster] = cluster_widths[cluster].max(column + 1);
        assigned.push(column);
        cluster_of.push(cluster);
    }

    let day_columns = column_ends.len();
    log::debug!(
        "Laid out {} events on {} in {} columns ({} clusters)",
        placements.len(),
        day,
        day_columns,
        cluster_widths.len()
    );

    placements
        .into_iter()
        .enumerate()
        .map(|(idx, placement)| PositionedEvent {
            event: placement.event,
            day_index,
            interval: placement.interval,
            top: placement.start_secs as f64 / SECONDS_PER_DAY as f64,
            height: placement.rendered_secs as f64 / SECONDS_PER_DAY as f64,
            column: assigned[idx],
            columns: match options.column_policy {
                ColumnPolicy::DayWide => day_columns,
                ColumnPolicy::PerCluster => cluster_widths[cluster_of[idx]],
            },
        })
        .collect()
}

/// Lay out a run of consecutive days, tagging each event with its day index.
pub fn layout_days<'a>(
    buckets: &DayBuckets<'a>,
    days: &[DayKey],
    options: LayoutOptions,
) -> Vec<PositionedEvent<'a>> {
    days.iter()
        .enumerate()
        .flat_map(|(day_index, &day)| layout_day(buckets.get(day), day, day_index, options))
        .collect()
}
