//! Persistence collaborator for the event collection.
//!
//! The store never performs I/O itself. A repository loads the collection at
//! startup and saves snapshots handed to it by [`PersistScheduler`].

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::event::Event;

mod scheduler;

pub use scheduler::PersistScheduler;

/// Storage backend for the event collection.
#[cfg_attr(test, mockall::automock)]
pub trait EventRepository {
    fn load(&self) -> Result<Vec<Event>>;
    fn save(&self, events: &[Event]) -> Result<()>;
}

/// Pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Event>> {
        if !self.path.exists() {
            log::info!("No events file at {}; starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read events from {}", self.path.display()))?;
        let events: Vec<Event> = serde_json::from_str(&data).with_context(|| {
            format!("failed to deserialize events from {}", self.path.display())
        })?;
        log::info!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }

    fn save(&self, events: &[Event]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = serde_json::to_string_pretty(events)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write events to {}", self.path.display()))?;
        log::debug!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the last saved collection in memory; useful for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    saved: RefCell<Vec<Event>>,
    saves: RefCell<usize>,
}

impl InMemoryRepository {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            saved: RefCell::new(events),
            saves: RefCell::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl EventRepository for InMemoryRepository {
    fn load(&self) -> Result<Vec<Event>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, events: &[Event]) -> Result<()> {
        *self.saved.borrow_mut() = events.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
