//! Picker configuration.

use crate::core::{ScoringScope, SelectionPolicy, DEFAULT_RETENTION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default window for "this session" pick listings.
pub const DEFAULT_SESSION_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Default number of picks shown in a summary's recent list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Default number of save attempts when a concurrent writer interferes.
pub const DEFAULT_MAX_SAVE_ATTEMPTS: usize = 3;

/// Tunables for the picker. Use [`crate::builder::PickerBuilder`] for a
/// validated instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// How selection probability relates to history.
    pub policy: SelectionPolicy,

    /// Which entities take part in fairness scoring.
    pub scope: ScoringScope,

    /// Pick timestamps kept per entity.
    pub retention: usize,

    /// How far back summaries look for recent picks.
    pub session_window: Duration,

    /// Maximum recent picks listed in a summary.
    pub recent_limit: usize,

    /// Attempts at saving a pick before giving up on revision conflicts.
    pub max_save_attempts: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            policy: SelectionPolicy::Uniform,
            scope: ScoringScope::WholeRoster,
            retention: DEFAULT_RETENTION,
            session_window: DEFAULT_SESSION_WINDOW,
            recent_limit: DEFAULT_RECENT_LIMIT,
            max_save_attempts: DEFAULT_MAX_SAVE_ATTEMPTS,
        }
    }
}
