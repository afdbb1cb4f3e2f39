//! Selection policies.
//!
//! A policy turns a roster and its history into one weight per roster
//! member; the pick is then a weighted draw. `Uniform` is the default and
//! ignores history entirely.

use super::history::HistoryState;
use super::roster::Roster;
use chrono::{DateTime, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hours after which a previous pick no longer lowers an entity's weight.
pub const RECENCY_CAP_HOURS: f64 = 24.0;

/// Lower bound for recency/frequency weights so nobody is excluded.
pub const MIN_WEIGHT: f64 = 0.1;

/// Errors that can occur while picking.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PickError {
    #[error("Cannot pick from an empty roster")]
    EmptyRoster,

    #[error("Selection weights are invalid: {0}")]
    InvalidWeights(String),
}

/// How selection probability relates to pick history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Every roster member is equally likely regardless of history.
    #[default]
    Uniform,
    /// Weight `1 / (count + 1)`: frequently picked entities become rarer.
    InverseCount,
    /// Weight grows with time since the last pick (capped at 24 hours) and
    /// with the gap to the most-picked entity. Never below [`MIN_WEIGHT`].
    RecencyFrequency,
}

impl SelectionPolicy {
    /// One weight per roster member, in roster order.
    pub fn weights(&self, roster: &Roster, history: &HistoryState, now: DateTime<Utc>) -> Vec<f64> {
        match self {
            Self::Uniform => vec![1.0; roster.len()],
            Self::InverseCount => roster
                .iter()
                .map(|id| 1.0 / (f64::from(history.count(id.as_str())) + 1.0))
                .collect(),
            Self::RecencyFrequency => {
                let max_picks = f64::from(history.max_count().max(1));
                roster
                    .iter()
                    .map(|id| {
                        let stats = history.stats(id.as_str());
                        let time_weight = stats.last_picked_at().map_or(RECENCY_CAP_HOURS, |last| {
                            let hours = now.signed_duration_since(last).num_seconds() as f64 / 3600.0;
                            hours.min(RECENCY_CAP_HOURS)
                        });
                        let frequency_weight = max_picks - f64::from(stats.count) + 1.0;
                        (time_weight * frequency_weight).max(MIN_WEIGHT)
                    })
                    .collect()
            }
        }
    }

    /// Draw a roster index according to this policy.
    ///
    /// Returns the chosen index together with the weights that were used.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        roster: &Roster,
        history: &HistoryState,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<(usize, Vec<f64>), PickError> {
        if roster.is_empty() {
            return Err(PickError::EmptyRoster);
        }

        let weights = self.weights(roster, history, now);
        let index = match self {
            Self::Uniform => rng.gen_range(0..roster.len()),
            _ => select_index(&weights, rng)?,
        };
        Ok((index, weights))
    }
}

/// Weighted random index into `weights`.
pub fn select_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Result<usize, PickError> {
    if weights.is_empty() {
        return Err(PickError::EmptyRoster);
    }
    let distribution =
        WeightedIndex::new(weights).map_err(|e| PickError::InvalidWeights(e.to_string()))?;
    Ok(distribution.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn uniform_weights_ignore_history() {
        let roster = Roster::from_names(["A", "B"]);
        let history: HistoryState = [("A", 9)].into_iter().collect();
        assert_eq!(
            SelectionPolicy::Uniform.weights(&roster, &history, now()),
            vec![1.0, 1.0]
        );
    }

    #[test]
    fn inverse_count_weights() {
        let roster = Roster::from_names(["A", "B", "C"]);
        let history: HistoryState = [("A", 3), ("B", 1)].into_iter().collect();
        let weights = SelectionPolicy::InverseCount.weights(&roster, &history, now());
        assert_eq!(weights, vec![0.25, 0.5, 1.0]);
    }

    #[test]
    fn recency_frequency_favours_never_picked() {
        let roster = Roster::from_names(["A", "B"]);
        let history = HistoryState::new().record_pick("A", now() - Duration::hours(2), 10);

        let weights = SelectionPolicy::RecencyFrequency.weights(&roster, &history, now());

        // A: 2 hours * (1 - 1 + 1); B: 24 hours * (1 - 0 + 1)
        assert!((weights[0] - 2.0).abs() < 1e-9);
        assert!((weights[1] - 48.0).abs() < 1e-9);
    }

    #[test]
    fn recency_frequency_has_floor() {
        let roster = Roster::from_names(["A"]);
        let history = HistoryState::new().record_pick("A", now(), 10);
        let weights = SelectionPolicy::RecencyFrequency.weights(&roster, &history, now());
        assert_eq!(weights, vec![MIN_WEIGHT]);
    }

    #[test]
    fn choose_rejects_empty_roster() {
        let mut rng = StdRng::seed_from_u64(7);
        let result =
            SelectionPolicy::Uniform.choose(&Roster::default(), &HistoryState::new(), now(), &mut rng);
        assert_eq!(result, Err(PickError::EmptyRoster));
    }

    #[test]
    fn choose_is_deterministic_with_seed() {
        let roster = Roster::from_names(["A", "B", "C", "D"]);
        let history = HistoryState::new();
        let policy = SelectionPolicy::InverseCount;

        let first = policy.choose(&roster, &history, now(), &mut StdRng::seed_from_u64(42));
        let second = policy.choose(&roster, &history, now(), &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn zero_weights_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select_index(&[0.0, 0.0], &mut rng);
        assert!(matches!(result, Err(PickError::InvalidWeights(_))));
    }

    #[test]
    fn weighted_draw_never_picks_zero_weight() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(select_index(&[0.0, 1.0, 0.0], &mut rng).unwrap(), 1);
        }
    }
}
