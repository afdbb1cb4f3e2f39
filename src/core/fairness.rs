//! Fairness scoring.
//!
//! The score is a normalised variance measure over pick counts: the
//! population variance divided by the squared mean, clamped to `[0, 1]` and
//! mapped onto `0..=100`. Equal counts score 100, one entity holding every
//! pick scores 0.

use super::history::HistoryState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score reported when there is no evidence of imbalance.
pub const PERFECT_SCORE: u8 = 100;

/// Which history entries take part in scoring.
///
/// Histories only contain entities that were picked, unless a roster has
/// been registered into them with explicit zero entries. The two scopes
/// decide whether never-picked students count against the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringScope {
    /// Only entities picked at least once are scored.
    PickedOnly,
    /// Every roster member is registered and scored, zero counts included.
    #[default]
    WholeRoster,
}

impl ScoringScope {
    /// Counts that participate in scoring under this scope.
    pub fn counts(&self, history: &HistoryState) -> Vec<u32> {
        match self {
            Self::PickedOnly => history
                .counts()
                .into_iter()
                .filter(|count| *count > 0)
                .collect(),
            Self::WholeRoster => history.counts(),
        }
    }

    pub fn score(&self, history: &HistoryState) -> u8 {
        score_counts(&self.counts(history))
    }
}

/// Fairness score of every entity present in the history.
///
/// Explicit zero entries are included. An empty history, or one where all
/// counts are zero, scores 100.
///
/// # Example
///
/// ```rust
/// use fairpick::core::{compute_fairness_score, HistoryState};
///
/// let even: HistoryState = [("Alice", 2), ("Bob", 2), ("Carol", 2)].into_iter().collect();
/// assert_eq!(compute_fairness_score(&even), 100);
///
/// let skewed: HistoryState = [("Alice", 6), ("Bob", 0), ("Carol", 0)].into_iter().collect();
/// assert_eq!(compute_fairness_score(&skewed), 0);
/// ```
pub fn compute_fairness_score(history: &HistoryState) -> u8 {
    score_counts(&history.counts())
}

/// Fairness score of a raw list of counts.
pub fn score_counts(counts: &[u32]) -> u8 {
    if counts.is_empty() || counts.iter().all(|count| *count == 0) {
        return PERFECT_SCORE;
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|c| f64::from(*c)).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|c| (f64::from(*c) - mean).powi(2))
        .sum::<f64>()
        / n;
    let max_variance = mean.powi(2);

    if max_variance == 0.0 {
        return PERFECT_SCORE;
    }

    let ratio = (variance / max_variance).min(1.0);
    (100.0 * (1.0 - ratio)).round().clamp(0.0, 100.0) as u8
}

/// Coarse banding of a fairness score for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FairnessRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for FairnessRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(pairs: &[(&'static str, u32)]) -> HistoryState {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_history_is_perfect() {
        assert_eq!(compute_fairness_score(&HistoryState::new()), 100);
        assert_eq!(score_counts(&[]), 100);
    }

    #[test]
    fn all_zero_counts_are_perfect() {
        assert_eq!(score_counts(&[0, 0, 0]), 100);
    }

    #[test]
    fn equal_counts_are_perfect() {
        assert_eq!(score_counts(&[4]), 100);
        assert_eq!(
            compute_fairness_score(&history(&[("Alice", 2), ("Bob", 2), ("Carol", 2)])),
            100
        );
    }

    #[test]
    fn one_entity_holding_everything_scores_zero() {
        assert_eq!(
            compute_fairness_score(&history(&[("Alice", 6), ("Bob", 0), ("Carol", 0)])),
            0
        );
        assert_eq!(score_counts(&[10, 0]), 0);
    }

    #[test]
    fn partial_imbalance_is_rounded() {
        // mean 2, variance 1, max variance 4
        assert_eq!(score_counts(&[3, 1]), 75);
        // mean 1.5, variance 0.25, max variance 2.25 -> 88.9
        assert_eq!(score_counts(&[2, 1]), 89);
    }

    #[test]
    fn picked_only_scope_ignores_zero_entries() {
        let h = history(&[("Alice", 10), ("Bob", 0)]);
        assert_eq!(ScoringScope::PickedOnly.score(&h), 100);
        assert_eq!(ScoringScope::WholeRoster.score(&h), 0);
    }

    #[test]
    fn default_scope_is_whole_roster() {
        assert_eq!(ScoringScope::default(), ScoringScope::WholeRoster);
    }

    #[test]
    fn rating_bands() {
        assert_eq!(FairnessRating::from_score(100), FairnessRating::Excellent);
        assert_eq!(FairnessRating::from_score(80), FairnessRating::Excellent);
        assert_eq!(FairnessRating::from_score(79), FairnessRating::Good);
        assert_eq!(FairnessRating::from_score(60), FairnessRating::Good);
        assert_eq!(FairnessRating::from_score(45), FairnessRating::Fair);
        assert_eq!(FairnessRating::from_score(39), FairnessRating::Poor);
        assert_eq!(FairnessRating::from_score(0).to_string(), "poor");
    }
}
