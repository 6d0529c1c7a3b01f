// Date utility functions
// Local wall-clock helpers shared by the grid, bucketing and layout code

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Canonical calendar-day identifier (year, month, day) in local time.
pub type DayKey = NaiveDate;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn day_key(instant: NaiveDateTime) -> DayKey {
    instant.date()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Midnight opening `day`.
pub fn start_of_day(day: DayKey) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Midnight closing `day` (exclusive bound, i.e. the start of the next day).
pub fn end_of_day(day: DayKey) -> NaiveDateTime {
    day.succ_opt()
        .map(start_of_day)
        .unwrap_or(NaiveDateTime::MAX)
}

/// Calculate the start of the week containing the given date.
pub fn week_start(date: NaiveDate, first_day_of_week: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let first = first_day_of_week.num_days_from_sunday() as i64;
    let offset = (weekday - first + 7) % 7;
    date - Duration::days(offset)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// The 1st of the month `delta_months` away from `date`'s month.
///
/// Saturates at the first of the current month if the target falls outside
/// the representable date range.
pub fn shift_month(date: NaiveDate, delta_months: i32) -> NaiveDate {
    let first = first_of_month(date);
    let months = Months::new(delta_months.unsigned_abs());
    let shifted = if delta_months >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Days from `first` to `last`, both inclusive. Empty when `last < first`.
pub fn days_inclusive(first: DayKey, last: DayKey) -> impl Iterator<Item = DayKey> {
    first.iter_days().take_while(move |day| *day <= last)
}

/// Signed minutes between two instants, with sub-minute precision.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Wall-clock instant `minutes` after the start of `day`.
pub fn at_minute(day: DayKey, minutes: u32) -> NaiveDateTime {
    start_of_day(day) + Duration::minutes(i64::from(minutes))
}
