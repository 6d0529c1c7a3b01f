//! Calendar widget orchestrator.
//!
//! [`CalendarWidget`] owns the event store and the view state (mode,
//! reference date, selection, open form, drag gesture) and turns user
//! intents into store mutations. Rendering produces a [`ViewModel`] that
//! borrows the current event snapshot.

pub mod drag;
pub mod event_form;
mod interactions;
mod navigation;
pub mod views;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::models::event::Event;
use crate::models::settings::CalendarConfig;
use crate::models::ui::ViewMode;
use crate::services::event::{EventStore, StoreError};
use crate::services::persistence::{EventRepository, PersistScheduler};
use crate::utils::date::DayKey;

pub use drag::{DragGesture, SlotRange};
pub use event_form::{EventDraft, FormError, FormSubmission};
pub use views::{MonthModel, ViewModel, WeekModel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CalendarWidget {
    config: CalendarConfig,
    store: EventStore,
    mode: ViewMode,
    reference_date: NaiveDate,
    selected: Option<DayKey>,
    form: Option<EventDraft>,
    gesture: DragGesture,
    scheduler: PersistScheduler,
}

impl CalendarWidget {
    /// Widget over an initial collection, opened on today's month.
    pub fn new(config: CalendarConfig, events: Vec<Event>) -> Self {
        Self::starting_at(config, events, Local::now().date_naive())
    }

    /// Widget over an initial collection, opened on `reference_date`.
    ///
    /// A config that fails [`CalendarConfig::validate`] is replaced by the
    /// defaults.
    pub fn starting_at(config: CalendarConfig, events: Vec<Event>, reference_date: NaiveDate) -> Self {
        let config = usable_config(config);
        let store = EventStore::new(events);
        let scheduler = PersistScheduler::from_millis(config.persist_debounce_ms, &store);
        log::info!(
            "Calendar widget ready with {} events at {}",
            store.len(),
            reference_date
        );
        Self {
            config,
            store,
            mode: ViewMode::default(),
            reference_date,
            selected: None,
            form: None,
            gesture: DragGesture::Idle,
            scheduler,
        }
    }

    /// Load the initial collection from `repository`.
    pub fn load(config: CalendarConfig, repository: &dyn EventRepository) -> anyhow::Result<Self> {
        let events = repository.load()?;
        Ok(Self::new(config, events))
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn events(&self) -> &[Event] {
        self.store.events()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn selected(&self) -> Option<DayKey> {
        self.selected
    }

    pub fn form(&self) -> Option<&EventDraft> {
        self.form.as_ref()
    }

    /// Mutable access for the presentation layer's field bindings.
    pub fn form_mut(&mut self) -> Option<&mut EventDraft> {
        self.form.as_mut()
    }

    pub fn gesture(&self) -> DragGesture {
        self.gesture
    }

    pub fn render(&self) -> ViewModel<'_> {
        self.render_at(Local::now().date_naive())
    }

    /// Build the render model for the active mode with `today` highlighted.
    pub fn render_at(&self, today: DayKey) -> ViewModel<'_> {
        let events = self.store.events();
        match self.mode {
            ViewMode::Month => ViewModel::Month(MonthModel::build(
                self.reference_date,
                events,
                today,
                self.selected,
                &self.config,
            )),
            ViewMode::Week => ViewModel::Week(WeekModel::build(
                self.reference_date,
                events,
                today,
                &self.config,
            )),
        }
    }

    /// Save through `repository` once the debounce window has passed.
    pub fn flush_persistence(
        &mut self,
        repository: &dyn EventRepository,
        now: std::time::Instant,
    ) -> anyhow::Result<bool> {
        self.scheduler.flush_if_due(&self.store, repository, now)
    }

    /// Save any pending changes immediately, e.g. on shutdown.
    pub fn persist_now(&mut self, repository: &dyn EventRepository) -> anyhow::Result<()> {
        self.scheduler.flush(&self.store, repository)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.scheduler.is_dirty()
    }

    /// Start or extend the debounce window after a store mutation.
    fn note_mutation(&mut self) {
        self.scheduler.observe(&self.store, std::time::Instant::now());
    }
}

fn usable_config(config: CalendarConfig) -> CalendarConfig {
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            log::warn!("Invalid calendar config ({err}), using defaults");
            CalendarConfig::default()
        }
    }
}
