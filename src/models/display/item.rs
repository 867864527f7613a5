//! Session item display model

use serde::Serialize;
use tabled::Tabled;

use super::truncate_string;
use crate::session::{ActionPayload, DisplayItem, ItemAction};

/// Subtitles longer than this are truncated in tables
const MAX_SUBTITLE: usize = 60;

/// Display item model for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ItemDisplay {
    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "DETAIL")]
    pub subtitle: String,

    #[tabled(rename = "ACTION")]
    pub action: String,
}

/// Short human description of an item action
pub fn describe_action(action: &ItemAction) -> String {
    match action {
        ItemAction::HideWindow | ItemAction::DoNothing => "-".to_string(),
        ItemAction::Custom(ActionPayload::Update) => "sync".to_string(),
        ItemAction::Custom(ActionPayload::Fetch { account }) => {
            format!("otp {}", account.id)
        }
        ItemAction::CopyToClipboard(_) => "copy".to_string(),
        ItemAction::OpenUrl(url) => format!("open {}", url),
        ItemAction::ResetQuery(keyword) => format!("query '{}'", keyword),
    }
}

impl From<&DisplayItem> for ItemDisplay {
    fn from(item: &DisplayItem) -> Self {
        Self {
            title: item.title.clone(),
            subtitle: item
                .subtitle
                .as_deref()
                .map(|s| truncate_string(s, MAX_SUBTITLE))
                .unwrap_or_default(),
            action: describe_action(&item.on_enter),
        }
    }
}
