//! List command: show every cached account

use chrono::Utc;
use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::AccountDisplay;
use crate::output::Formattable;

/// List accounts, refreshing first if the snapshot is stale.
///
/// A failed refresh is reported on stderr and the cached accounts are
/// listed anyway.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    ctx.session.config().connection()?;

    if let Err(e) = ctx.session.ensure_fresh(Utc::now()).await {
        eprintln!("{} Could not sync accounts: {}", "⚠".yellow(), e);
    }
    ctx.persist();

    let rows: Vec<AccountDisplay> = ctx
        .session
        .cache()
        .accounts()
        .iter()
        .map(|account| AccountDisplay::from_account(account, ctx.session.icons()))
        .collect();

    rows.print(ctx.format)
}
