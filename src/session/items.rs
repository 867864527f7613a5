//! Display items handed to the launcher for rendering

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cache::IconStore;
use crate::client::{Account, Otp};

/// Payload attached to items that call back into the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ActionPayload {
    /// Re-sync the account cache
    Update,
    /// Fetch an OTP for the account
    Fetch { account: Account },
}

/// Item icon: one of the bundled images or a cached account icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Warning,
    App,
    Sync,
    Launch,
    Account,
    Edit,
    Cached(PathBuf),
}

impl Icon {
    /// Icon for an account: its cached image if on disk, else the placeholder
    pub fn for_account(account: &Account, icons: &IconStore) -> Self {
        account
            .icon
            .as_deref()
            .and_then(|name| icons.resolve(name))
            .map(Icon::Cached)
            .unwrap_or(Icon::Account)
    }
}

/// What happens when the user activates an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemAction {
    HideWindow,
    DoNothing,
    /// Keep the launcher open and send the payload back as an action event
    Custom(ActionPayload),
    CopyToClipboard(String),
    OpenUrl(String),
    /// Reset the query to the bare keyword
    ResetQuery(String),
}

/// One row in the launcher result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub icon: Icon,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub on_enter: ItemAction,
}

impl DisplayItem {
    pub fn new(icon: Icon, title: impl Into<String>, on_enter: ItemAction) -> Self {
        Self {
            icon,
            title: title.into(),
            subtitle: None,
            on_enter,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Dismissable warning
    pub fn warning(title: &str, description: impl ToString) -> Self {
        Self::new(Icon::Warning, title, ItemAction::HideWindow).with_subtitle(description.to_string())
    }

    pub fn config_error(err: impl ToString) -> Self {
        Self::warning("Configuration Error", err)
    }

    pub fn sync_error(err: impl ToString) -> Self {
        Self::warning("Could not sync accounts", err)
    }

    /// Account row that fetches an OTP when activated
    pub fn account(account: &Account, icons: &IconStore) -> Self {
        Self::new(
            Icon::for_account(account, icons),
            account.service.clone(),
            ItemAction::Custom(ActionPayload::Fetch {
                account: account.clone(),
            }),
        )
        .with_subtitle(account.account.clone())
    }

    pub fn instructions() -> Self {
        Self::new(Icon::App, "Account Search", ItemAction::DoNothing)
            .with_subtitle("Enter the service and/or account name")
    }

    pub fn sync_action() -> Self {
        Self::new(
            Icon::Sync,
            "Sync Accounts",
            ItemAction::Custom(ActionPayload::Update),
        )
        .with_subtitle("Refresh list of cached accounts")
    }

    pub fn open_website(url: &str) -> Self {
        Self::new(Icon::Launch, "Open Website", ItemAction::OpenUrl(url.to_string()))
            .with_subtitle("Open 2FAuth website in browser")
    }

    pub fn sync_done(keyword: &str, accounts: usize) -> Self {
        Self::new(
            Icon::Sync,
            "All Done!",
            ItemAction::ResetQuery(keyword.to_string()),
        )
        .with_subtitle(format!("Synced {} accounts", accounts))
    }

    pub fn otp(otp: &Otp) -> Self {
        Self::new(
            Icon::Account,
            otp.password.clone(),
            ItemAction::CopyToClipboard(otp.password.clone()),
        )
        .with_subtitle("Copy to clipboard")
    }

    pub fn otp_error(err: impl ToString) -> Self {
        Self::warning("Could not fetch OTP", err)
    }

    pub fn edit_account(url: String) -> Self {
        Self::new(Icon::Edit, "Edit Account", ItemAction::OpenUrl(url))
            .with_subtitle("Open account editor in browser")
    }
}
