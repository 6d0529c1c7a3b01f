use thiserror::Error;

use crate::models::event::EventId;

/// Errors reported by event store mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Event with id {0} not found")]
    NotFound(EventId),
}
