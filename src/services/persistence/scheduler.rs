use std::time::{Duration, Instant};

use anyhow::Result;

use super::EventRepository;
use crate::services::event::EventStore;

/// Debounces saves of the event collection.
///
/// Each call to [`observe`](Self::observe) compares the store revision with
/// the last one seen; a change restarts the quiet period. Once the store has
/// been quiet for `delay`, [`flush_if_due`](Self::flush_if_due) saves the
/// current snapshot exactly once.
#[derive(Debug, Clone)]
pub struct PersistScheduler {
    delay: Duration,
    seen_revision: u64,
    saved_revision: u64,
    last_change: Option<Instant>,
}

impl PersistScheduler {
    pub fn new(delay: Duration, store: &EventStore) -> Self {
        Self {
            delay,
            seen_revision: store.revision(),
            saved_revision: store.revision(),
            last_change: None,
        }
    }

    pub fn from_millis(delay_ms: u64, store: &EventStore) -> Self {
        Self::new(Duration::from_millis(delay_ms), store)
    }

    pub fn observe(&mut self, store: &EventStore, now: Instant) {
        if store.revision() != self.seen_revision {
            self.seen_revision = store.revision();
            self.last_change = Some(now);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.seen_revision != self.saved_revision
    }

    /// Time left before a pending save becomes due.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        if !self.is_dirty() {
            return None;
        }
        let elapsed = self
            .last_change
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or(self.delay);
        Some(self.delay.saturating_sub(elapsed))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due_in(now) == Some(Duration::ZERO)
    }

    /// Save if the quiet period has elapsed. Returns whether a save happened.
    pub fn flush_if_due(
        &mut self,
        store: &EventStore,
        repository: &dyn EventRepository,
        now: Instant,
    ) -> Result<bool> {
        self.observe(store, now);
        if !self.is_due(now) {
            return Ok(false);
        }
        self.flush(store, repository)?;
        Ok(true)
    }

    /// Save immediately if anything is pending, e.g. on shutdown.
    pub fn flush(&mut self, store: &EventStore, repository: &dyn EventRepository) -> Result<()> {
        self.seen_revision = store.revision();
        if !self.is_dirty() {
            return Ok(());
        }

        if let Err(err) = repository.save(store.events()) {
            log::error!("Failed to persist events: {err:?}");
            return Err(err);
        }
        self.saved_revision = store.revision();
        self.last_change = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use crate::services::persistence::MockEventRepository;
    use chrono::NaiveDate;

    fn new_event() -> NewEvent {
        let start = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        NewEvent::new("Test", start, start + chrono::Duration::hours(1))
    }

    #[test]
    fn test_clean_store_never_saves() {
        let store = EventStore::default();
        let mut repo = MockEventRepository::new();
        repo.expect_save().never();

        let mut scheduler = PersistScheduler::from_millis(250, &store);
        let now = Instant::now();
        assert!(!scheduler.flush_if_due(&store, &repo, now).unwrap());
        assert_eq!(scheduler.next_due_in(now), None);
    }

    #[test]
    fn test_burst_of_changes_saves_once_after_quiet_period() {
        let mut store = EventStore::default();
        let mut repo = MockEventRepository::new();
        repo.expect_save()
            .times(1)
            .withf(|events| events.len() == 3)
            .returning(|_| Ok(()));

        let mut scheduler = PersistScheduler::from_millis(250, &store);
        let t0 = Instant::now();

        for step in 0..3u64 {
            store.add(new_event());
            let now = t0 + Duration::from_millis(step * 100);
            assert!(!scheduler.flush_if_due(&store, &repo, now).unwrap());
        }

        let quiet = t0 + Duration::from_millis(200 + 250);
        assert!(scheduler.flush_if_due(&store, &repo, quiet).unwrap());
        assert!(!scheduler.is_dirty());
        assert!(!scheduler
            .flush_if_due(&store, &repo, quiet + Duration::from_secs(5))
            .unwrap());
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut store = EventStore::default();
        let mut repo = MockEventRepository::new();
        repo.expect_save()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("disk full")));

        let mut scheduler = PersistScheduler::from_millis(0, &store);
        store.add(new_event());

        assert!(scheduler.flush_if_due(&store, &repo, Instant::now()).is_err());
        assert!(scheduler.is_dirty());
    }

    #[test]
    fn test_flush_forces_pending_save() {
        let mut store = EventStore::default();
        let mut repo = MockEventRepository::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let mut scheduler = PersistScheduler::from_millis(60_000, &store);
        store.add(new_event());
        scheduler.flush(&store, &repo).unwrap();
        scheduler.flush(&store, &repo).unwrap();
        assert!(!scheduler.is_dirty());
    }
}
