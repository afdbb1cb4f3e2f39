//! Effectful picker operations using Stillwater 0.11.0.
//!
//! This module is the "imperative shell" around the pure engine: it loads
//! history from a [`HistoryStore`](crate::store::HistoryStore), runs the
//! engine, and saves the merged result.
//!
//! # Key Concepts
//!
//! - **Environment**: effects run against any [`PickerEnv`], which supplies
//!   the store, clock, period and random source
//! - **Effects**: operations return `BoxedEffect` and do nothing until run
//! - **Conflicts**: a pick that loses a race against another writer is merged
//!   onto the fresh history, never re-drawn

mod effects;
mod env;

pub use effects::{
    load_history, pick_and_record, reset_history, save_history, summarize_history, RecordedPick,
    ShellError,
};
pub use env::{PickerEnv, StoreEnv};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{compute_fairness_score, HistoryState, PickError, Roster, TrackingPeriod};
    use crate::engine::PickerConfig;
    use crate::store::{HistoryStore, MemoryStore, StoreError, StoredHistory};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stillwater::prelude::*;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 3, 10, 15, 0).unwrap()
    }

    fn roster() -> Roster {
        Roster::from_names(["Alice", "Bob", "Carol"])
    }

    fn env() -> StoreEnv<MemoryStore> {
        StoreEnv::new(MemoryStore::new()).at(now()).with_seed(1)
    }

    /// Store where another writer sneaks in before the first `interference` saves.
    struct RacingStore {
        inner: MemoryStore,
        interference: usize,
        saves: AtomicUsize,
    }

    impl RacingStore {
        fn new(interference: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                interference,
                saves: AtomicUsize::new(0),
            }
        }
    }

    impl HistoryStore for RacingStore {
        fn load(&self, period: &TrackingPeriod) -> Result<StoredHistory, StoreError> {
            self.inner.load(period)
        }

        fn save(
            &self,
            period: &TrackingPeriod,
            history: &HistoryState,
            expected: Option<Uuid>,
        ) -> Result<Uuid, StoreError> {
            if self.saves.fetch_add(1, Ordering::SeqCst) < self.interference {
                let current = self.inner.load(period)?;
                let other = current.history.record_pick("Dana", now(), 10);
                self.inner.save(period, &other, current.revision)?;
            }
            self.inner.save(period, history, expected)
        }

        fn reset(&self, period: &TrackingPeriod) -> Result<(), StoreError> {
            self.inner.reset(period)
        }
    }

    #[tokio::test]
    async fn pick_is_persisted() {
        let env = env();

        let recorded = pick_and_record(roster(), PickerConfig::default())
            .run(&env)
            .await
            .unwrap();

        assert_eq!(recorded.attempts, 1);
        let stored = load_history().run(&env).await.unwrap();
        assert_eq!(stored.revision, Some(recorded.revision));
        assert_eq!(stored.history, recorded.outcome.updated_history);
        assert_eq!(stored.history.count(recorded.outcome.selected.as_str()), 1);
    }

    #[tokio::test]
    async fn successive_picks_accumulate() {
        let env = env();

        for _ in 0..6 {
            pick_and_record(roster(), PickerConfig::default())
                .run(&env)
                .await
                .unwrap();
        }

        let stored = load_history().run(&env).await.unwrap();
        assert_eq!(stored.history.total_picks(), 6);
        assert_eq!(stored.history.len(), 3);
    }

    #[tokio::test]
    async fn empty_roster_is_reported() {
        let env = env();
        let result = pick_and_record(Roster::default(), PickerConfig::default())
            .run(&env)
            .await;

        assert!(matches!(result, Err(ShellError::Pick(PickError::EmptyRoster))));
        let stored = load_history().run(&env).await.unwrap();
        assert!(stored.revision.is_none());
    }

    #[tokio::test]
    async fn conflicting_save_is_merged() {
        let env = StoreEnv::new(RacingStore::new(1)).at(now()).with_seed(3);

        let recorded = pick_and_record(roster(), PickerConfig::default())
            .run(&env)
            .await
            .unwrap();

        assert_eq!(recorded.attempts, 2);
        let stored = load_history().run(&env).await.unwrap();
        assert_eq!(stored.history.count("Dana"), 1);
        assert_eq!(stored.history.count(recorded.outcome.selected.as_str()), 1);
        assert_eq!(stored.history.total_picks(), 2);
        assert_eq!(
            recorded.outcome.fairness_score,
            compute_fairness_score(&stored.history)
        );
    }

    #[tokio::test]
    async fn persistent_conflicts_give_up() {
        let env = StoreEnv::new(RacingStore::new(usize::MAX)).at(now()).with_seed(3);
        let config = PickerConfig {
            max_save_attempts: 2,
            ..PickerConfig::default()
        };

        let result = pick_and_record(roster(), config).run(&env).await;

        assert!(matches!(
            result,
            Err(ShellError::ConflictRetriesExhausted { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn reset_clears_store() {
        let env = env();
        pick_and_record(roster(), PickerConfig::default())
            .run(&env)
            .await
            .unwrap();

        let fresh = reset_history().run(&env).await.unwrap();

        assert!(fresh.is_empty());
        assert_eq!(compute_fairness_score(&fresh), 100);
        let stored = load_history().run(&env).await.unwrap();
        assert!(stored.history.is_empty());
    }

    #[tokio::test]
    async fn save_requires_loaded_revision() {
        let env = env();
        let history = HistoryState::new().record_pick("Alice", now(), 10);

        let revision = save_history(history.clone(), None).run(&env).await.unwrap();
        let stale = save_history(history.clone(), None).run(&env).await;
        assert!(matches!(stale, Err(ShellError::Store(ref e)) if e.is_conflict()));

        save_history(history, Some(revision)).run(&env).await.unwrap();
    }

    #[tokio::test]
    async fn summary_reads_current_period() {
        let store = Arc::new(MemoryStore::new());
        let period = TrackingPeriod::new(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
        let history: HistoryState = [("Alice", 2), ("Bob", 2), ("Carol", 2)].into_iter().collect();
        store.save(&period, &history, None).unwrap();

        let env = StoreEnv::shared(Arc::clone(&store)).at(now());
        let summary = summarize_history(roster(), PickerConfig::default())
            .run(&env)
            .await
            .unwrap();

        assert_eq!(summary.total_picks, 6);
        assert_eq!(summary.fairness_score, 100);
        assert!(summary.never_picked.is_empty());
    }
}
