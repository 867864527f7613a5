//! On-disk store for account icons
//!
//! Icons are keyed by the filename the API reports for an account. A file at
//! the expected path is trusted as-is: icons are never re-validated, expired
//! or deleted.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::client::{Account, TwoFAuthApi};
use crate::config::Connection;
use crate::error::{CacheError, Result};

/// Outcome of a materialization pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IconReport {
    pub fetched: usize,
    pub failed: usize,
}

/// Local icon directory
#[derive(Debug, Clone)]
pub struct IconStore {
    dir: PathBuf,
}

impl IconStore {
    /// Icon store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Expected path for an icon, or `None` if the name is not a plain filename
    pub fn path_for(&self, icon: &str) -> Option<PathBuf> {
        is_safe_name(icon).then(|| self.dir.join(icon))
    }

    /// Path of the icon if it is already on disk
    pub fn resolve(&self, icon: &str) -> Option<PathBuf> {
        self.path_for(icon).filter(|path| path.is_file())
    }

    pub fn is_present(&self, icon: &str) -> bool {
        self.resolve(icon).is_some()
    }

    /// Write icon bytes, going through a temp file so readers never see a partial icon
    pub fn store(&self, icon: &str, bytes: &[u8]) -> std::result::Result<PathBuf, CacheError> {
        let path = self
            .path_for(icon)
            .ok_or_else(|| CacheError::InvalidName(icon.to_string()))?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| CacheError::Io(format!("Failed to create icon dir: {}", e)))?;

        let tmp = self.dir.join(format!(".{}.part", icon));
        std::fs::write(&tmp, bytes)
            .map_err(|e| CacheError::Io(format!("Failed to write icon {}: {}", icon, e)))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| CacheError::Io(format!("Failed to move icon {} into place: {}", icon, e)))?;

        Ok(path)
    }

    /// Download every icon referenced by `accounts` that is not on disk yet.
    ///
    /// Each distinct icon is attempted once. Failures are logged and counted
    /// but never abort the pass.
    pub async fn materialize(
        &self,
        api: &dyn TwoFAuthApi,
        conn: &Connection,
        accounts: &[Account],
    ) -> IconReport {
        let mut report = IconReport::default();
        let mut seen = HashSet::new();

        for account in accounts {
            let Some(icon) = account.icon.as_deref() else {
                continue;
            };
            if !seen.insert(icon) || self.is_present(icon) {
                continue;
            }
            if !is_safe_name(icon) {
                log::warn!("Skipping icon with unsafe name for account #{}: {:?}", account.id, icon);
                report.failed += 1;
                continue;
            }

            log::debug!("Fetching icon for account #{}...", account.id);
            match self.fetch_one(api, conn, icon).await {
                Ok(_) => report.fetched += 1,
                Err(e) => {
                    log::warn!("Failed to fetch icon {}: {}", icon, e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    async fn fetch_one(&self, api: &dyn TwoFAuthApi, conn: &Connection, icon: &str) -> Result<PathBuf> {
        let bytes = api.fetch_icon(conn, icon).await?;
        Ok(self.store(icon, &bytes)?)
    }
}

fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
