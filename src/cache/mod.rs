//! Local account cache
//!
//! Holds the in-memory account snapshot and its refresh policy, the on-disk
//! icon store, and the snapshot file used between one-shot invocations.

pub mod accounts;
pub mod icons;
pub mod storage;

use std::path::PathBuf;

use crate::error::CacheError;

// Re-export main types
pub use accounts::{AccountCache, RefreshReport, Snapshot};
pub use icons::{IconReport, IconStore};
pub use storage::{SNAPSHOT_FILE, SnapshotStore};

/// Get the cache directory path (~/.cache/twofauth on Linux)
pub fn cache_dir() -> Result<PathBuf, CacheError> {
    let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
    Ok(cache_base.join("twofauth"))
}
