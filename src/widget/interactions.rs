// User intents coming back from the presentation layer: day clicks, the
// create/edit form, drag-to-create and drag-to-reschedule.

use chrono::{NaiveDate, NaiveDateTime};

use super::drag::SlotRange;
use super::event_form::{EventDraft, FormSubmission};
use super::views::WeekModel;
use super::{CalendarWidget, WidgetError};
use crate::models::event::{Event, EventId};
use crate::services::event::StoreError;
use crate::utils::date::DayKey;

impl CalendarWidget {
    /// Month cell clicked: select it and open a creation form for that day.
    pub fn click_day(&mut self, day: DayKey) {
        self.selected = Some(day);
        self.open_create(day);
    }

    pub fn open_create(&mut self, date: NaiveDate) {
        self.form = Some(EventDraft::new_for_date(date, &self.config));
    }

    pub fn open_create_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.form = Some(EventDraft::new_for_range(start, end, &self.config));
    }

    /// Event clicked: open the edit form prefilled from it.
    pub fn open_edit(&mut self, id: &EventId) -> Result<(), StoreError> {
        let event = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.form = Some(EventDraft::for_event(event, &self.config));
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate the open form and apply it. Returns the created or updated
    /// event; `None` when no form is open.
    ///
    /// A validation or store error keeps the form open with the user's edits.
    pub fn submit_form(&mut self) -> Result<Option<Event>, WidgetError> {
        let Some(draft) = self.form.as_ref() else {
            return Ok(None);
        };

        let submission = draft.validate()?;
        let saved = match submission {
            FormSubmission::Create(new_event) => self.store.add(new_event),
            FormSubmission::Update { id, patch } => {
                self.store.update(&id, patch)?;
                self.store
                    .get(&id)
                    .cloned()
                    .ok_or(StoreError::NotFound(id))?
            }
        };
        self.form = None;
        self.note_mutation();
        Ok(Some(saved))
    }

    /// Delete the event being edited. The form closes either way.
    pub fn delete_from_form(&mut self) -> Result<(), StoreError> {
        let Some(draft) = self.form.take() else {
            return Ok(());
        };
        let Some(id) = draft.event_id else {
            return Ok(());
        };
        self.store.delete(&id)?;
        self.note_mutation();
        Ok(())
    }

    /// Reschedule an event, e.g. after it was dragged to a new slot.
    pub fn move_event(
        &mut self,
        id: &EventId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<(), StoreError> {
        self.store.move_event(id, start, end)?;
        self.note_mutation();
        Ok(())
    }

    /// Pointer pressed on a week slot. Slots outside the week are ignored.
    pub fn drag_press(&mut self, day_index: usize, slot: u32) {
        if self.is_week_slot(day_index, slot) {
            self.gesture = self.gesture.press(day_index, slot);
        }
    }

    pub fn drag_hover(&mut self, day_index: usize, slot: u32) {
        if self.is_week_slot(day_index, slot) {
            self.gesture = self.gesture.hover(day_index, slot);
        }
    }

    /// Pointer released. A committed range opens a creation form and returns
    /// the range that was used.
    pub fn drag_release(&mut self) -> Option<SlotRange> {
        self.gesture = self.gesture.release();
        self.open_committed_range()
    }

    pub fn drag_cancel(&mut self) {
        self.gesture = self.gesture.cancel();
    }

    /// Keyboard activation (Enter) on one slot of the week view.
    pub fn activate_slot(&mut self, day_index: usize, slot: u32) -> Option<SlotRange> {
        if !self.is_week_slot(day_index, slot) {
            return None;
        }
        self.gesture = self.gesture.activate(day_index, slot);
        self.open_committed_range()
    }

    fn is_week_slot(&self, day_index: usize, slot: u32) -> bool {
        let valid = day_index < 7 && slot < self.config.slots_per_day();
        if !valid {
            log::debug!("Ignoring slot {} on day {} outside the week grid", slot, day_index);
        }
        valid
    }

    fn open_committed_range(&mut self) -> Option<SlotRange> {
        let range = self.gesture.committed()?;
        self.gesture = self.gesture.reset();

        let week = WeekModel::build(self.reference_date, &[], self.reference_date, &self.config);
        match range.to_instants(&week) {
            Some((start, end)) => {
                self.open_create_range(start, end);
                Some(range)
            }
            None => {
                log::warn!("Ignoring slot range outside the visible week: {:?}", range);
                None
            }
        }
    }
}
