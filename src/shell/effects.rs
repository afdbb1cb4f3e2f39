//! Effectful picker operations.
//!
//! Each function returns a boxed Stillwater effect that runs against any
//! [`PickerEnv`]. The pure engine does the picking; these effects only move
//! history in and out of the store.

use super::env::PickerEnv;
use crate::core::{HistoryState, PickError, Roster};
use crate::engine::{
    apply_pick, pick_one, reset_history as fresh_history, summarize, PickOutcome, PickerConfig,
    PickerSummary,
};
use crate::store::{StoreError, StoredHistory};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors that can occur while running picker effects
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Pick(#[from] PickError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Gave up saving pick after {attempts} conflicting attempts")]
    ConflictRetriesExhausted { attempts: usize },
}

/// A pick that has been persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPick {
    pub outcome: PickOutcome,
    /// Revision of the saved history
    pub revision: Uuid,
    /// Save attempts used, 1 unless another writer interfered
    pub attempts: usize,
}

/// Load the current period's history.
pub fn load_history<Env: PickerEnv>() -> BoxedEffect<StoredHistory, ShellError, Env> {
    from_fn(|env: &Env| -> Result<StoredHistory, ShellError> {
        let period = env.period();
        Ok(env.store().load(&period)?)
    })
    .boxed()
}

/// Save a history over the revision the caller loaded.
pub fn save_history<Env: PickerEnv>(
    history: HistoryState,
    expected: Option<Uuid>,
) -> BoxedEffect<Uuid, ShellError, Env> {
    from_fn(move |env: &Env| -> Result<Uuid, ShellError> {
        let period = env.period();
        Ok(env.store().save(&period, &history, expected)?)
    })
    .boxed()
}

/// Clear the current period and return the fresh history.
pub fn reset_history<Env: PickerEnv>() -> BoxedEffect<HistoryState, ShellError, Env> {
    from_fn(|env: &Env| -> Result<HistoryState, ShellError> {
        let period = env.period();
        env.store().reset(&period)?;
        info!(period = %period, "Pick history reset");
        Ok(fresh_history())
    })
    .boxed()
}

/// Pick from the roster and persist the result.
///
/// When another writer saves between load and save, the same pick is
/// merged onto the fresher history and saved again, up to
/// `config.max_save_attempts` times.
pub fn pick_and_record<Env: PickerEnv>(
    roster: Roster,
    config: PickerConfig,
) -> BoxedEffect<RecordedPick, ShellError, Env> {
    from_fn(move |env: &Env| record_pick(env, &roster, &config)).boxed()
}

/// Load the current period and summarize it for the roster.
pub fn summarize_history<Env: PickerEnv>(
    roster: Roster,
    config: PickerConfig,
) -> BoxedEffect<PickerSummary, ShellError, Env> {
    from_fn(move |env: &Env| -> Result<PickerSummary, ShellError> {
        let period = env.period();
        let stored = env.store().load(&period)?;
        Ok(summarize(&roster, &stored.history, &config, env.now()))
    })
    .boxed()
}

fn record_pick<Env: PickerEnv>(
    env: &Env,
    roster: &Roster,
    config: &PickerConfig,
) -> Result<RecordedPick, ShellError> {
    let period = env.period();
    let store = env.store();
    let mut rng = env.rng();

    let stored = store.load(&period)?;
    let mut outcome = pick_one(roster, &stored.history, config, env.now(), &mut rng)?;
    let mut expected = stored.revision;
    let max_attempts = config.max_save_attempts.max(1);

    for attempt in 1..=max_attempts {
        match store.save(&period, &outcome.updated_history, expected) {
            Ok(revision) => {
                info!(
                    period = %period,
                    selected = %outcome.selected,
                    fairness = outcome.fairness_score,
                    attempt,
                    "Recorded pick"
                );
                return Ok(RecordedPick {
                    outcome,
                    revision,
                    attempts: attempt,
                });
            }
            Err(err) if err.is_conflict() => {
                warn!(period = %period, attempt, max_attempts, "History changed during pick, merging");
                let fresh = store.load(&period)?;
                let (merged, score) = apply_pick(&fresh.history, &outcome.delta, roster, config);
                outcome.updated_history = merged;
                outcome.fairness_score = score;
                expected = fresh.revision;
                debug!(period = %period, revision = ?expected, "Reloaded history");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(ShellError::ConflictRetriesExhausted {
        attempts: max_attempts,
    })
}
