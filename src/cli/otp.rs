//! OTP command: fetch a one-time password for one account

use chrono::Utc;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::{Account, AccountId};
use crate::error::{Error, Result};
use crate::output::Formattable;
use crate::session::{ActionPayload, Event, ItemAction};

/// Fetch and print the OTP for the account with the given ID.
///
/// The account does not need to be in the cache: an unknown ID is sent to
/// the service as-is. Exits with an error if no password came back.
pub async fn run(opts: &GlobalOptions, id: &str) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let Ok(id) = id.parse::<AccountId>();
    let account = ctx.session.cache().find(&id).cloned().unwrap_or_else(|| {
        log::debug!("Account #{} not cached, fetching by ID", id);
        Account {
            id,
            service: String::new(),
            account: String::new(),
            icon: None,
        }
    });

    let payload = ActionPayload::Fetch { account };
    let response = ctx.session.handle(Event::Action { payload }, Utc::now()).await;
    response.print(ctx.format)?;

    let fetched = response
        .items
        .iter()
        .any(|item| matches!(item.on_enter, ItemAction::CopyToClipboard(_)));
    if fetched {
        Ok(())
    } else {
        Err(Error::Other("Could not fetch OTP".to_string()))
    }
}
