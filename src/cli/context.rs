//! Command execution context
//!
//! Loads settings, merges CLI overrides and builds a [`Session`] warmed from
//! the saved account snapshot, so every command starts from the same state.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::{SNAPSHOT_FILE, Snapshot, SnapshotStore};
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::TwoFAuthClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

/// Context for command execution containing the session and runtime options.
pub struct CommandContext {
    /// Launcher session (settings, account cache, recents)
    pub session: Session,
    /// Output format preference
    pub format: OutputFormat,
    /// Where the snapshot is saved between runs
    store: SnapshotStore,
    /// Snapshot timestamp as of the last load or save
    persisted_at: DateTime<Utc>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// The config file is loaded (defaults if missing), `--url`/`--token`
    /// overrides are applied on top, and the saved snapshot seeds the cache
    /// unless `--no-cache` was given. A corrupt snapshot is logged and ignored.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        if let Some(url) = &opts.url {
            config.url = Some(url.clone());
        }
        if let Some(token) = &opts.token {
            config.token = Some(token.clone());
        }

        let cache_dir = resolve_cache_dir(opts)?;
        let store = SnapshotStore::at(cache_dir.join(SNAPSHOT_FILE));

        let snapshot = if opts.no_cache {
            log::debug!("Ignoring saved snapshot (--no-cache)");
            Snapshot::default()
        } else {
            match store.load() {
                Ok(Some(snapshot)) => {
                    log::debug!(
                        "Loaded {} cached accounts from {}",
                        snapshot.accounts.len(),
                        store.path().display()
                    );
                    snapshot
                }
                Ok(None) => Snapshot::default(),
                Err(e) => {
                    log::warn!("Ignoring unreadable snapshot: {}", e);
                    Snapshot::default()
                }
            }
        };
        let persisted_at = snapshot.updated_at;

        let client = Arc::new(TwoFAuthClient::new()?);
        let session = Session::new(config, cache_dir.join("icons"), client).with_snapshot(snapshot);

        Ok(Self {
            session,
            format: opts.format,
            store,
            persisted_at,
        })
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Save the snapshot if the session refreshed it since the last save.
    ///
    /// Failures are logged rather than returned: the command itself already
    /// succeeded and the next run simply refreshes again.
    pub fn persist(&mut self) {
        let snapshot = self.session.cache().snapshot();
        if snapshot.updated_at == self.persisted_at {
            return;
        }

        match self.store.save(snapshot) {
            Ok(()) => {
                log::debug!("Saved account snapshot to {}", self.store.path().display());
                self.persisted_at = snapshot.updated_at;
            }
            Err(e) => log::warn!("Failed to save account snapshot: {}", e),
        }
    }
}

/// Cache directory from `--cache-dir`, else the platform default
pub fn resolve_cache_dir(opts: &GlobalOptions) -> Result<PathBuf> {
    match &opts.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(crate::cache::cache_dir()?),
    }
}
