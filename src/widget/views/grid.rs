//! Date-grid generation for the month and week windows.

use chrono::{Duration, NaiveDate, Weekday};

use crate::utils::date::{first_of_month, week_start, DayKey};

pub const GRID_WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTH_GRID_CELLS: usize = GRID_WEEKS * DAYS_PER_WEEK;

/// The 42 consecutive days shown for `reference`'s month, starting on the
/// week-start day on or before the 1st.
pub fn month_grid(reference: NaiveDate, first_day_of_week: Weekday) -> [DayKey; MONTH_GRID_CELLS] {
    let start = week_start(first_of_month(reference), first_day_of_week);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// The 7 consecutive days of the week containing `reference`.
pub fn week_range(reference: NaiveDate, first_day_of_week: Weekday) -> [DayKey; DAYS_PER_WEEK] {
    let start = week_start(reference, first_day_of_week);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// Abbreviated weekday names in display order.
pub fn weekday_labels(first_day_of_week: Weekday) -> [&'static str; DAYS_PER_WEEK] {
    const NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    let start = first_day_of_week.num_days_from_sunday() as usize;
    std::array::from_fn(|idx| NAMES[(start + idx) % DAYS_PER_WEEK])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use test_case::test_case;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test_case(d(2025, 1, 15), d(2024, 12, 29) ; "january 2025 starts in december")]
    #[test_case(d(2023, 10, 31), d(2023, 10, 1) ; "month starting on sunday")]
    #[test_case(d(2026, 2, 1), d(2026, 2, 1) ; "february 2026 starts on sunday")]
    #[test_case(d(2024, 2, 29), d(2024, 1, 28) ; "leap february")]
    fn test_month_grid_start(reference: NaiveDate, expected_start: NaiveDate) {
        let grid = month_grid(reference, Weekday::Sun);
        assert_eq!(grid[0], expected_start);
        assert_eq!(grid[0].weekday(), Weekday::Sun);
        assert_eq!(grid[41], expected_start + Duration::days(41));
        assert!(grid.contains(&reference));
    }

    #[test]
    fn test_month_grid_monday_start() {
        let grid = month_grid(d(2025, 1, 15), Weekday::Mon);
        assert_eq!(grid[0], d(2024, 12, 30));
        assert!(grid.windows(2).all(|pair| pair[1] == pair[0] + Duration::days(1)));
    }

    #[test]
    fn test_week_range() {
        let week = week_range(d(2025, 1, 15), Weekday::Sun);
        assert_eq!(week[0], d(2025, 1, 12));
        assert_eq!(week[6], d(2025, 1, 18));

        let saturday = week_range(d(2025, 1, 18), Weekday::Sun);
        assert_eq!(saturday, week);
    }

    #[test]
    fn test_weekday_labels_rotate() {
        assert_eq!(weekday_labels(Weekday::Sun)[0], "Sun");
        assert_eq!(
            weekday_labels(Weekday::Mon),
            ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }
}
