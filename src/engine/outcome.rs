//! Values returned by the engine.

use crate::core::{EntityId, FairnessRating, HistoryState, PickRecord, Roster};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single pick, detached from the history it was made against.
///
/// The store layer re-applies a delta onto a fresher history when a
/// concurrent writer saved first, so the announced entity never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickDelta {
    pub entity: EntityId,
    pub at: DateTime<Utc>,
}

/// Result of [`crate::engine::pick_one`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickOutcome {
    /// The chosen entity
    pub selected: EntityId,

    /// History with the pick applied; the input history is untouched
    pub updated_history: HistoryState,

    /// Fairness of `updated_history`
    pub fairness_score: u8,

    /// When the pick happened
    pub picked_at: DateTime<Utc>,

    /// The pick as a mergeable change
    pub delta: PickDelta,

    /// Roster size at pick time
    pub total_entities: usize,

    /// Weight of each roster member, in roster order
    pub selection_weights: Vec<(EntityId, f64)>,
}

/// One roster member's line in a summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub entity: EntityId,
    pub count: u32,
    pub last_picked: Option<DateTime<Utc>>,
}

/// Dashboard statistics for a roster and its history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSummary {
    pub total_entities: usize,
    pub total_picks: u64,
    pub fairness_score: u8,
    pub rating: FairnessRating,
    /// Roster members sorted by count ascending, ties in roster order
    pub standings: Vec<Standing>,
    pub never_picked: Vec<EntityId>,
    /// Picks within the session window, newest first
    pub recent: Vec<PickRecord>,
}

impl PickerSummary {
    pub(crate) fn build(
        roster: &Roster,
        history: &HistoryState,
        fairness_score: u8,
        recent: Vec<PickRecord>,
    ) -> Self {
        let mut standings: Vec<Standing> = roster
            .iter()
            .map(|id| {
                let stats = history.stats(id.as_str());
                Standing {
                    entity: id.clone(),
                    count: stats.count,
                    last_picked: stats.last_picked_at(),
                }
            })
            .collect();
        standings.sort_by_key(|standing| standing.count);

        let never_picked = standings
            .iter()
            .filter(|standing| standing.count == 0)
            .map(|standing| standing.entity.clone())
            .collect();

        Self {
            total_entities: roster.len(),
            total_picks: history.total_picks(),
            fairness_score,
            rating: FairnessRating::from_score(fairness_score),
            standings,
            never_picked,
            recent,
        }
    }
}
