//! Sync command: refresh the account cache now

use std::time::Duration;

use chrono::Utc;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;

/// Force a refresh regardless of staleness and report what was fetched
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    let conn = ctx.session.config().connection()?;

    let spinner = if ctx.format == OutputFormat::Json {
        ProgressBar::hidden()
    } else {
        spinner(format!("Syncing accounts from {} ...", conn.base_url))
    };

    let result = ctx.session.refresh(Utc::now()).await;
    spinner.finish_and_clear();
    let report = result?;
    ctx.persist();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "accounts": report.accounts,
                "icons_fetched": report.icons.fetched,
                "icons_failed": report.icons.failed,
                "updated_at": ctx.session.cache().updated_at(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{} Synced {} accounts", "✓".green(), report.accounts);
            if report.icons.fetched > 0 {
                println!("  {} new icons downloaded", report.icons.fetched);
            }
            if report.icons.failed > 0 {
                println!(
                    "  {} {} icons could not be downloaded (run with --debug for details)",
                    "⚠".yellow(),
                    report.icons.failed
                );
            }
        }
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
