use chrono::{Duration, Local, NaiveDate};

use super::CalendarWidget;
use crate::models::ui::ViewMode;
use crate::utils::date::shift_month;

impl CalendarWidget {
    /// Month mode lands on the 1st of the next month; week mode moves 7 days.
    pub fn next(&mut self) {
        self.reference_date = step(self.mode, self.reference_date, 1);
        log::debug!("Navigated forward to {}", self.reference_date);
    }

    pub fn previous(&mut self) {
        self.reference_date = step(self.mode, self.reference_date, -1);
        log::debug!("Navigated back to {}", self.reference_date);
    }

    pub fn today(&mut self) {
        self.go_to(Local::now().date_naive());
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        self.reference_date = date;
    }

    /// Switch mode, keeping the reference date.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.gesture = self.gesture.cancel();
            self.mode = mode;
        }
    }
}

fn step(mode: ViewMode, date: NaiveDate, direction: i32) -> NaiveDate {
    match mode {
        ViewMode::Month => shift_month(date, direction),
        ViewMode::Week => date
            .checked_add_signed(Duration::weeks(i64::from(direction)))
            .unwrap_or(date),
    }
}
