//! Launcher backend loop
//!
//! Reads one JSON [`Event`] per line from stdin and writes one JSON
//! [`Response`] per line to stdout. Events are handled strictly one at a
//! time, in order. Logging goes to stderr so stdout stays machine-readable.

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::session::{DisplayItem, Event, Response};

/// Serve launcher events until stdin closes
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    log::info!("2FAuth launcher backend ready");

    let stdin = BufReader::new(tokio::io::stdin());
    serve(&mut ctx, stdin, tokio::io::stdout()).await
}

async fn serve<R, W>(ctx: &mut CommandContext, input: R, mut output: W) -> Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Event>(line) {
            Ok(event) => {
                let response = ctx.session.handle(event, Utc::now()).await;
                ctx.persist();
                response
            }
            Err(e) => {
                log::warn!("Ignoring malformed event: {}", e);
                Response::single(DisplayItem::warning("Invalid event", e))
            }
        };

        let mut json = serde_json::to_vec(&response)?;
        json.push(b'\n');
        output.write_all(&json).await?;
        output.flush().await?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
