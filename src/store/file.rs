//! File-backed history store.
//!
//! One file per tracking period, written atomically (temp file, then
//! rename) so a crash mid-write never leaves a truncated history behind.

use super::{HistoryStore, StoreError, StoredHistory};
use crate::core::{HistoryState, TrackingPeriod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// On-disk encoding of stored history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreFormat {
    /// Pretty-printed JSON, readable and hand-editable
    #[default]
    Json,
    /// Compact bincode
    Binary,
}

impl StoreFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }

    fn encode(&self, stored: &StoredHistory) -> Result<Vec<u8>, StoreError> {
        match self {
            Self::Json => serde_json::to_vec_pretty(stored)
                .map_err(|e| StoreError::SerializationFailed(e.to_string())),
            Self::Binary => {
                bincode::serialize(stored).map_err(|e| StoreError::SerializationFailed(e.to_string()))
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<StoredHistory, StoreError> {
        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| StoreError::DeserializationFailed(e.to_string())),
            Self::Binary => bincode::deserialize(bytes)
                .map_err(|e| StoreError::DeserializationFailed(e.to_string())),
        }
    }
}

/// History store writing one file per period into a directory.
///
/// Saves within one process are serialized; the revision check protects
/// against stale snapshots.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    format: StoreFormat,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>, format: StoreFormat) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            format,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    /// File holding the history of a period.
    pub fn path_for(&self, period: &TrackingPeriod) -> PathBuf {
        self.dir
            .join(format!("{}.{}", period.key(), self.format.extension()))
    }

    fn read(&self, period: &TrackingPeriod) -> Result<StoredHistory, StoreError> {
        let path = self.path_for(period);
        if !path.exists() {
            return Ok(StoredHistory::empty(*period));
        }
        let bytes = fs::read(&path)?;
        let stored = self.format.decode(&bytes)?;
        stored.check_version()?;
        Ok(stored)
    }
}

impl HistoryStore for FileStore {
    fn load(&self, period: &TrackingPeriod) -> Result<StoredHistory, StoreError> {
        let stored = self.read(period)?;
        debug!(period = %period, revision = ?stored.revision, "Loaded history file");
        Ok(stored)
    }

    fn save(
        &self,
        period: &TrackingPeriod,
        history: &HistoryState,
        expected: Option<Uuid>,
    ) -> Result<Uuid, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("file store lock poisoned".to_string()))?;

        self.read(period)?.check_revision(expected)?;

        let stored = StoredHistory::saved(*period, history.clone());
        let revision = stored.revision.unwrap_or_else(Uuid::new_v4);
        let bytes = self.format.encode(&stored)?;

        let path = self.path_for(period);
        write_atomically(&path, &bytes)?;

        debug!(period = %period, revision = %revision, path = %path.display(), "Saved history file");
        Ok(revision)
    }

    fn reset(&self, period: &TrackingPeriod) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("file store lock poisoned".to_string()))?;

        let path = self.path_for(period);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        info!(period = %period, "History file reset");
        Ok(())
    }
}

/// Write through a sibling temp file and rename it into place. The temp
/// file is removed again if either step fails.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let written = fs::write(&temp_path, bytes).and_then(|()| fs::rename(&temp_path, path));
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), error = %cleanup, "Temp file not removed");
        }
        return Err(err.into());
    }
    Ok(())
}
