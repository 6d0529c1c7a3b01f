//! Day-bucketing index: events grouped by every calendar day they occupy.

use std::collections::HashMap;

use crate::models::event::Event;
use crate::utils::date::{self, DayKey};

/// Events grouped by day. Within a bucket, events keep input order.
#[derive(Debug, Default, Clone)]
pub struct DayBuckets<'a> {
    buckets: HashMap<DayKey, Vec<&'a Event>>,
}

impl<'a> DayBuckets<'a> {
    /// Bucket every event under each day it spans, start and end inclusive.
    pub fn build<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        Self::build_with(events, |event| event.days_spanned().collect())
    }

    /// Bucket only the days within `first..=last`.
    ///
    /// Long events are clipped to the window so cost stays proportional to the
    /// visible range.
    pub fn build_within<I>(events: I, first: DayKey, last: DayKey) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        Self::build_with(events, |event| {
            if !event.occupies_any(first, last) {
                return Vec::new();
            }
            let from = event.first_day().max(first);
            let to = event.last_day().min(last);
            date::days_inclusive(from, to).collect()
        })
    }

    /// Bucket using a caller-supplied day mapping.
    pub fn build_with<I, F>(events: I, days_of: F) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
        F: Fn(&Event) -> Vec<DayKey>,
    {
        let mut buckets: HashMap<DayKey, Vec<&'a Event>> = HashMap::new();
        let mut placements = 0usize;

        for event in events {
            for day in days_of(event) {
                buckets.entry(day).or_default().push(event);
                placements += 1;
            }
        }

        log::debug!(
            "Bucketed {} placements across {} days",
            placements,
            buckets.len()
        );
        Self { buckets }
    }

    /// Events on `day`; empty when none.
    pub fn get(&self, day: DayKey) -> &[&'a Event] {
        self.buckets.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, day: DayKey) -> usize {
        self.get(day).len()
    }

    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.buckets.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
