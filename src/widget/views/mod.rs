// Derived render models: date grids, day buckets, positioned events.

pub mod buckets;
pub mod grid;
pub mod layout;
pub mod month_view;
pub mod week_view;

pub use buckets::DayBuckets;
pub use layout::{clip_to_day, layout_day, layout_days, ClippedInterval, LayoutOptions, PositionedEvent};
pub use month_view::{GridCell, MonthModel};
pub use week_view::WeekModel;

/// What the presentation layer draws for the active view mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel<'a> {
    Month(MonthModel<'a>),
    Week(WeekModel<'a>),
}

impl ViewModel<'_> {
    pub fn title(&self) -> String {
        match self {
            ViewModel::Month(model) => model.title(),
            ViewModel::Week(model) => model.title(),
        }
    }
}
