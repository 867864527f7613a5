//! Snapshot file storage
//!
//! One-shot commands run in a fresh process each time, so the account
//! snapshot is kept in a JSON file between invocations. The recents list is
//! deliberately not stored here.

use std::path::{Path, PathBuf};

use super::Snapshot;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// Snapshot filename inside the cache directory
pub const SNAPSHOT_FILE: &str = "accounts.json";

/// JSON file holding the last account snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Snapshot store at a specific file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved snapshot, if any
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::Io(format!("Failed to read snapshot: {}", e))),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|e| CacheError::Corrupt(e.to_string()))
    }

    /// Save a snapshot, replacing any previous one atomically
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;
        }

        let json = serde_json::to_vec(snapshot).map_err(|e| CacheError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.part");
        std::fs::write(&tmp, json)
            .map_err(|e| CacheError::Io(format!("Failed to write snapshot: {}", e)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| CacheError::Io(format!("Failed to move snapshot into place: {}", e)))?;

        Ok(())
    }

    /// Delete the saved snapshot. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::Io(format!("Failed to remove snapshot: {}", e))),
        }
    }
}
