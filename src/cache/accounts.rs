//! Account snapshot and refresh policy

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{IconReport, IconStore};
use crate::client::{Account, AccountId, TwoFAuthApi};
use crate::config::Config;
use crate::error::{Error, Result};

/// Accounts from one successful fetch, plus the time of that fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub updated_at: DateTime<Utc>,
    pub accounts: Vec<Account>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            accounts: Vec::new(),
        }
    }
}

/// Summary of a successful refresh
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub accounts: usize,
    pub icons: IconReport,
}

/// In-memory account cache with time-based expiry
#[derive(Debug, Clone)]
pub struct AccountCache {
    snapshot: Snapshot,
    expiry: Duration,
}

impl AccountCache {
    /// Empty cache; stale until the first refresh
    pub fn new(expiry: Duration) -> Self {
        Self::with_snapshot(Snapshot::default(), expiry)
    }

    /// Cache seeded from a previously saved snapshot
    pub fn with_snapshot(snapshot: Snapshot, expiry: Duration) -> Self {
        Self { snapshot, expiry }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn accounts(&self) -> &[Account] {
        &self.snapshot.accounts
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.snapshot.updated_at
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn set_expiry(&mut self, expiry: Duration) {
        self.expiry = expiry;
    }

    /// Look up a cached account by id
    pub fn find(&self, id: &AccountId) -> Option<&Account> {
        self.snapshot.accounts.iter().find(|a| &a.id == id)
    }

    /// True once `now` is past `updated_at + expiry`
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.snapshot.updated_at.checked_add_signed(self.expiry) {
            Some(deadline) => now > deadline,
            None => false,
        }
    }

    /// Refresh only if the snapshot is stale.
    ///
    /// Returns `Ok(None)` without touching the network when still fresh.
    pub async fn ensure_fresh(
        &mut self,
        api: &dyn TwoFAuthApi,
        config: &Config,
        icons: &IconStore,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshReport>> {
        if !self.is_stale(now) {
            return Ok(None);
        }

        log::debug!("2FAuth cache has expired");
        self.refresh(api, config, icons, now).await.map(Some)
    }

    /// Replace the snapshot with a fresh account list and fetch missing icons.
    ///
    /// The snapshot is only replaced after the account list was fetched and
    /// parsed in full; on any error it is left exactly as it was. Icon
    /// failures are reported in the returned [`RefreshReport`], not as errors.
    pub async fn refresh(
        &mut self,
        api: &dyn TwoFAuthApi,
        config: &Config,
        icons: &IconStore,
        now: DateTime<Utc>,
    ) -> Result<RefreshReport> {
        let result = self.refresh_inner(api, config, icons, now).await;
        match &result {
            Err(Error::Api(api)) if api.is_network() => {
                log::warn!("2FAuth unreachable, keeping cached accounts: {}", api)
            }
            Err(e) => log::error!("Error updating 2FAuth cache: {}", e),
            Ok(_) => {}
        }
        result
    }

    async fn refresh_inner(
        &mut self,
        api: &dyn TwoFAuthApi,
        config: &Config,
        icons: &IconStore,
        now: DateTime<Utc>,
    ) -> Result<RefreshReport> {
        let conn = config.connection()?;

        log::debug!("Fetching 2FAuth accounts from {}...", conn.base_url);
        let accounts = api.list_accounts(&conn).await?;
        log::debug!("Fetched {} 2FAuth accounts", accounts.len());

        self.snapshot = Snapshot {
            updated_at: now,
            accounts,
        };

        log::debug!("Fetching account icons into {}...", icons.dir().display());
        let icon_report = icons.materialize(api, &conn, &self.snapshot.accounts).await;

        Ok(RefreshReport {
            accounts: self.snapshot.accounts.len(),
            icons: icon_report,
        })
    }
}
