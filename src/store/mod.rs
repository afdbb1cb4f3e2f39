//! Persistence for pick history.
//!
//! The engine never performs I/O. A [`HistoryStore`] loads the history of a
//! tracking period, saves the merged result after a pick and resets it on
//! request. Saves are guarded by a revision token so two pickers working
//! from the same snapshot cannot silently overwrite each other.

use crate::core::{HistoryState, TrackingPeriod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;
pub mod file;
pub mod memory;

pub use error::StoreError;
pub use file::{FileStore, StoreFormat};
pub use memory::MemoryStore;

/// Version identifier for the stored history format
pub const STORE_FORMAT_VERSION: u32 = 1;

/// History of one tracking period as held by a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredHistory {
    /// Storage format version
    pub version: u32,

    /// Period the history belongs to
    pub period: TrackingPeriod,

    /// Token of the last save, `None` if nothing was saved yet
    pub revision: Option<Uuid>,

    /// When the last save happened
    pub updated_at: Option<DateTime<Utc>>,

    /// The pick history itself
    pub history: HistoryState,
}

impl StoredHistory {
    /// An unsaved, empty history for a period.
    pub fn empty(period: TrackingPeriod) -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            period,
            revision: None,
            updated_at: None,
            history: HistoryState::new(),
        }
    }

    /// A freshly saved history with a new revision.
    pub(crate) fn saved(period: TrackingPeriod, history: HistoryState) -> Self {
        Self {
            version: STORE_FORMAT_VERSION,
            period,
            revision: Some(Uuid::new_v4()),
            updated_at: Some(Utc::now()),
            history,
        }
    }

    pub(crate) fn check_version(&self) -> Result<(), StoreError> {
        if self.version != STORE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                supported: STORE_FORMAT_VERSION,
            });
        }
        Ok(())
    }

    pub(crate) fn check_revision(&self, expected: Option<Uuid>) -> Result<(), StoreError> {
        if self.revision != expected {
            return Err(StoreError::RevisionConflict {
                expected,
                found: self.revision,
            });
        }
        Ok(())
    }
}

/// Backend that persists pick history per tracking period.
///
/// Implementations must be safe to share between threads.
pub trait HistoryStore: Send + Sync {
    /// Load the history of a period. A period with no saved history loads
    /// as [`StoredHistory::empty`].
    fn load(&self, period: &TrackingPeriod) -> Result<StoredHistory, StoreError>;

    /// Save a history, provided the stored revision still equals `expected`.
    /// Returns the new revision.
    fn save(
        &self,
        period: &TrackingPeriod,
        history: &HistoryState,
        expected: Option<Uuid>,
    ) -> Result<Uuid, StoreError>;

    /// Clear all history of a period.
    fn reset(&self, period: &TrackingPeriod) -> Result<(), StoreError>;
}
