//! In-process history store.

use super::{HistoryStore, StoreError, StoredHistory};
use crate::core::{HistoryState, TrackingPeriod};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// History store backed by a map in memory.
///
/// The revision check and the write happen under one lock, so concurrent
/// saves from the same snapshot are detected.
#[derive(Debug, Default)]
pub struct MemoryStore {
    periods: RwLock<HashMap<TrackingPeriod, StoredHistory>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of periods with saved history.
    pub fn period_count(&self) -> usize {
        self.periods.read().map(|periods| periods.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

impl HistoryStore for MemoryStore {
    fn load(&self, period: &TrackingPeriod) -> Result<StoredHistory, StoreError> {
        let periods = self.periods.read().map_err(poisoned)?;
        let stored = periods
            .get(period)
            .cloned()
            .unwrap_or_else(|| StoredHistory::empty(*period));
        debug!(period = %period, revision = ?stored.revision, "Loaded history");
        Ok(stored)
    }

    fn save(
        &self,
        period: &TrackingPeriod,
        history: &HistoryState,
        expected: Option<Uuid>,
    ) -> Result<Uuid, StoreError> {
        let mut periods = self.periods.write().map_err(poisoned)?;
        let current_revision = periods.get(period).and_then(|stored| stored.revision);
        if current_revision != expected {
            return Err(StoreError::RevisionConflict {
                expected,
                found: current_revision,
            });
        }

        let stored = StoredHistory::saved(*period, history.clone());
        let revision = stored.revision.unwrap_or_else(Uuid::new_v4);
        periods.insert(*period, stored);
        debug!(period = %period, revision = %revision, "Saved history");
        Ok(revision)
    }

    fn reset(&self, period: &TrackingPeriod) -> Result<(), StoreError> {
        let mut periods = self.periods.write().map_err(poisoned)?;
        periods.remove(period);
        info!(period = %period, "History reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn period() -> TrackingPeriod {
        TrackingPeriod::new(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap())
    }

    #[test]
    fn missing_period_loads_empty() {
        let store = MemoryStore::new();
        let stored = store.load(&period()).unwrap();
        assert!(stored.history.is_empty());
        assert!(stored.revision.is_none());
    }

    #[test]
    fn save_then_load_returns_history() {
        let store = MemoryStore::new();
        let history = HistoryState::new().record_pick("Alice", Utc::now(), 10);

        let revision = store.save(&period(), &history, None).unwrap();
        let stored = store.load(&period()).unwrap();

        assert_eq!(stored.history, history);
        assert_eq!(stored.revision, Some(revision));
        assert!(stored.updated_at.is_some());
    }

    #[test]
    fn stale_save_is_rejected() {
        let store = MemoryStore::new();
        let first = HistoryState::new().record_pick("Alice", Utc::now(), 10);
        let second = HistoryState::new().record_pick("Bob", Utc::now(), 10);

        store.save(&period(), &first, None).unwrap();
        let err = store.save(&period(), &second, None).unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(store.load(&period()).unwrap().history, first);
    }

    #[test]
    fn reset_clears_period() {
        let store = MemoryStore::new();
        let history = HistoryState::new().record_pick("Alice", Utc::now(), 10);
        store.save(&period(), &history, None).unwrap();
        assert_eq!(store.period_count(), 1);

        store.reset(&period()).unwrap();

        assert_eq!(store.period_count(), 0);
        assert!(store.load(&period()).unwrap().history.is_empty());
    }

    #[test]
    fn periods_are_independent() {
        let store = MemoryStore::new();
        let other = TrackingPeriod::new(NaiveDate::from_ymd_opt(2024, 9, 4).unwrap());
        let history = HistoryState::new().record_pick("Alice", Utc::now(), 10);

        store.save(&period(), &history, None).unwrap();

        assert!(store.load(&other).unwrap().history.is_empty());
    }
}
