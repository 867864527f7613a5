//! Account display model

use serde::Serialize;
use tabled::Tabled;

use crate::cache::IconStore;
use crate::client::Account;

/// Account display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AccountDisplay {
    /// Account ID
    #[tabled(rename = "ID")]
    pub id: String,

    /// Service name
    #[tabled(rename = "SERVICE")]
    pub service: String,

    /// Account name
    #[tabled(rename = "ACCOUNT")]
    pub account: String,

    /// Icon filename (or "-")
    #[tabled(rename = "ICON")]
    pub icon: String,
}

impl AccountDisplay {
    /// Display row that also says whether the icon is on disk yet
    pub fn from_account(account: &Account, icons: &IconStore) -> Self {
        let mut display = AccountDisplay::from(account);
        if let Some(icon) = account.icon.as_deref().filter(|icon| !icons.is_present(icon)) {
            display.icon = format!("{} (not cached)", icon);
        }
        display
    }
}

impl From<Account> for AccountDisplay {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            service: account.service,
            account: account.account,
            icon: account.icon.unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl From<&Account> for AccountDisplay {
    fn from(account: &Account) -> Self {
        AccountDisplay::from(account.clone())
    }
}
