//! Query command: run a launcher search from the shell

use chrono::Utc;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::output::Formattable;
use crate::session::Event;

/// Search accounts and print the result list the launcher would show
pub async fn run(opts: &GlobalOptions, words: &[String]) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    let query = words.join(" ");
    let response = ctx.session.handle(Event::Query { query }, Utc::now()).await;
    ctx.persist();

    response.print(ctx.format)
}
