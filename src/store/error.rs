//! History store error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while loading, saving or resetting history
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Stored data was written by an unknown format version
    #[error("Unsupported history format version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Another writer saved since the caller loaded
    #[error("History was modified concurrently (expected revision {expected:?}, found {found:?})")]
    RevisionConflict {
        expected: Option<Uuid>,
        found: Option<Uuid>,
    },

    /// Backend-specific failure
    #[error("History backend failed: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RevisionConflict { .. })
    }
}
