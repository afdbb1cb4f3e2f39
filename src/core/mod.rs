//! Core selection types and logic.
//!
//! This module contains the pure functional core of the picker:
//! - Entity identity and rosters
//! - Immutable per-period pick history
//! - Fairness scoring and selection policies
//!
//! All logic in this module is pure (no side effects, no I/O). Randomness
//! and the current time are always passed in by the caller.

mod entity;
mod fairness;
mod history;
mod roster;
mod selection;

pub use entity::EntityId;
pub use fairness::{compute_fairness_score, score_counts, FairnessRating, ScoringScope, PERFECT_SCORE};
pub use history::{EntityStats, HistoryState, PickRecord, TrackingPeriod, DEFAULT_RETENTION};
pub use roster::{Roster, RosterError};
pub use selection::{select_index, PickError, SelectionPolicy, MIN_WEIGHT, RECENCY_CAP_HOURS};
