//! The fair selection engine.
//!
//! `pick_one` is a pure function of the roster, the history, the clock value
//! and a random source. [`FairPicker`] bundles a configuration with a seeded
//! RNG for callers that don't want to manage either.

use super::config::PickerConfig;
use super::outcome::{PickDelta, PickOutcome, PickerSummary};
use crate::core::{HistoryState, PickError, Roster, ScoringScope};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pick one roster member and return the updated history and its score.
///
/// Fails with [`PickError::EmptyRoster`] when the roster is empty. The
/// input history is not modified.
///
/// # Example
///
/// ```rust
/// use fairpick::core::{HistoryState, Roster};
/// use fairpick::engine::{pick_one, PickerConfig};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use chrono::Utc;
///
/// let roster = Roster::from_names(["Alice", "Bob", "Carol"]);
/// let history = HistoryState::new();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let outcome = pick_one(&roster, &history, &PickerConfig::default(), Utc::now(), &mut rng).unwrap();
///
/// assert!(roster.contains(outcome.selected.as_str()));
/// assert_eq!(outcome.updated_history.total_picks(), 1);
/// assert!(history.is_empty());
/// ```
pub fn pick_one<R: Rng + ?Sized>(
    roster: &Roster,
    history: &HistoryState,
    config: &PickerConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<PickOutcome, PickError> {
    let (index, weights) = config.policy.choose(roster, history, now, rng)?;
    let selected = roster.get(index).cloned().ok_or(PickError::EmptyRoster)?;

    let delta = PickDelta {
        entity: selected.clone(),
        at: now,
    };
    let (updated_history, fairness_score) = apply_pick(history, &delta, roster, config);

    Ok(PickOutcome {
        selected,
        updated_history,
        fairness_score,
        picked_at: now,
        delta,
        total_entities: roster.len(),
        selection_weights: roster.iter().cloned().zip(weights).collect(),
    })
}

/// Merge a pick into a history and score the result.
///
/// Under [`ScoringScope::WholeRoster`] the roster is registered first, so the
/// returned score equals `compute_fairness_score` of the returned history.
pub fn apply_pick(
    history: &HistoryState,
    delta: &PickDelta,
    roster: &Roster,
    config: &PickerConfig,
) -> (HistoryState, u8) {
    let base = match config.scope {
        ScoringScope::WholeRoster => history.with_roster(roster),
        ScoringScope::PickedOnly => history.clone(),
    };
    let updated = base.record_pick(delta.entity.clone(), delta.at, config.retention);
    let score = config.scope.score(&updated);
    (updated, score)
}

/// A fresh, empty history for a new tracking period.
pub fn reset_history() -> HistoryState {
    HistoryState::new()
}

/// Dashboard statistics for a roster as of `now`.
pub fn summarize(
    roster: &Roster,
    history: &HistoryState,
    config: &PickerConfig,
    now: DateTime<Utc>,
) -> PickerSummary {
    let score = match config.scope {
        ScoringScope::WholeRoster => config.scope.score(&history.with_roster(roster)),
        ScoringScope::PickedOnly => config.scope.score(history),
    };

    let since = chrono::Duration::from_std(config.session_window)
        .ok()
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut recent = history.picks_since(since);
    recent.reverse();
    recent.truncate(config.recent_limit);

    PickerSummary::build(roster, history, score, recent)
}

/// Configured picker with its own random source.
pub struct FairPicker {
    config: PickerConfig,
    rng: StdRng,
}

impl FairPicker {
    /// Create a picker seeded from OS entropy.
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a picker with a fixed seed (for testing and replays).
    pub fn with_seed(config: PickerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Pick at the current time.
    pub fn pick_one(&mut self, roster: &Roster, history: &HistoryState) -> Result<PickOutcome, PickError> {
        self.pick_one_at(roster, history, Utc::now())
    }

    pub fn pick_one_at(
        &mut self,
        roster: &Roster,
        history: &HistoryState,
        now: DateTime<Utc>,
    ) -> Result<PickOutcome, PickError> {
        pick_one(roster, history, &self.config, now, &mut self.rng)
    }

    pub fn reset_history(&self) -> HistoryState {
        reset_history()
    }

    /// Fairness of a history under the configured scope.
    pub fn score(&self, history: &HistoryState) -> u8 {
        self.config.scope.score(history)
    }

    pub fn summarize(&self, roster: &Roster, history: &HistoryState) -> PickerSummary {
        summarize(roster, history, &self.config, Utc::now())
    }

    pub fn summarize_at(
        &self,
        roster: &Roster,
        history: &HistoryState,
        now: DateTime<Utc>,
    ) -> PickerSummary {
        summarize(roster, history, &self.config, now)
    }
}

impl Default for FairPicker {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}
