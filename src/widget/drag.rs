//! Drag-to-create gesture over the week view's time slots.
//!
//! The gesture is a plain value with pure transitions, independent of how
//! pointer input is captured. A gesture that never completes is dropped with
//! [`DragGesture::cancel`] and leaves nothing behind.

use chrono::NaiveDateTime;

use super::views::WeekModel;

/// Half-open run of slots `[start_slot, end_slot)` within one day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub day_index: usize,
    pub start_slot: u32,
    pub end_slot: u32,
}

impl SlotRange {
    pub fn single(day_index: usize, slot: u32) -> Self {
        Self {
            day_index,
            start_slot: slot,
            end_slot: slot.saturating_add(1),
        }
    }

    /// Range covering both the anchor slot and the current slot.
    pub fn spanning(day_index: usize, anchor_slot: u32, current_slot: u32) -> Self {
        Self {
            day_index,
            start_slot: anchor_slot.min(current_slot),
            end_slot: anchor_slot.max(current_slot).saturating_add(1),
        }
    }

    pub fn len(&self) -> u32 {
        self.end_slot - self.start_slot
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, day_index: usize, slot: u32) -> bool {
        self.day_index == day_index && (self.start_slot..self.end_slot).contains(&slot)
    }

    /// Start and end instants of the range within `week`.
    pub fn to_instants(&self, week: &WeekModel<'_>) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = week.slot_start(self.day_index, self.start_slot)?;
        let end = week.slot_start(self.day_index, self.end_slot)?;
        Some((start, end))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        day_index: usize,
        anchor_slot: u32,
        current_slot: u32,
    },
    Committed(SlotRange),
}

impl DragGesture {
    /// Pointer pressed on a slot. Any previous gesture is discarded.
    pub fn press(self, day_index: usize, slot: u32) -> Self {
        DragGesture::Dragging {
            day_index,
            anchor_slot: slot,
            current_slot: slot,
        }
    }

    /// Pointer moved over a slot. The selection follows the pointer's day.
    pub fn hover(self, day_index: usize, slot: u32) -> Self {
        match self {
            DragGesture::Dragging { anchor_slot, .. } => DragGesture::Dragging {
                day_index,
                anchor_slot,
                current_slot: slot,
            },
            other => other,
        }
    }

    /// Pointer released. Only an active drag commits.
    pub fn release(self) -> Self {
        match self.selection() {
            Some(range) if matches!(self, DragGesture::Dragging { .. }) => {
                log::debug!(
                    "Drag committed on day {} slots {}..{}",
                    range.day_index,
                    range.start_slot,
                    range.end_slot
                );
                DragGesture::Committed(range)
            }
            _ => self,
        }
    }

    /// Keyboard activation of a single slot.
    pub fn activate(self, day_index: usize, slot: u32) -> Self {
        DragGesture::Committed(SlotRange::single(day_index, slot))
    }

    /// Pointer lost or escape pressed.
    pub fn cancel(self) -> Self {
        DragGesture::Idle
    }

    /// Committed range consumed by the caller.
    pub fn reset(self) -> Self {
        DragGesture::Idle
    }

    /// Range to highlight while dragging, or the committed range.
    pub fn selection(&self) -> Option<SlotRange> {
        match *self {
            DragGesture::Idle => None,
            DragGesture::Dragging {
                day_index,
                anchor_slot,
                current_slot,
            } => Some(SlotRange::spanning(day_index, anchor_slot, current_slot)),
            DragGesture::Committed(range) => Some(range),
        }
    }

    pub fn committed(&self) -> Option<SlotRange> {
        match *self {
            DragGesture::Committed(range) => Some(range),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }
}
