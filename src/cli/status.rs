//! Status command implementation

use chrono::Utc;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::formatters::{format_age, format_duration};

/// Display configuration and cache status without touching the network
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let ctx = CommandContext::new(opts)?;
    let config = ctx.session.config();
    let cache = ctx.session.cache();
    let now = Utc::now();

    if ctx.format == OutputFormat::Json {
        let json = serde_json::json!({
            "config_path": config_path.display().to_string(),
            "config_exists": config_path.exists(),
            "url": config.url,
            "token_set": config.token.as_deref().is_some_and(|t| !t.trim().is_empty()),
            "keyword": config.keyword,
            "expiry_hours": config.expiry_hours,
            "recent_max": ctx.session.recent().capacity(),
            "accounts": cache.accounts().len(),
            "updated_at": cache.updated_at(),
            "stale": cache.is_stale(now),
            "snapshot_path": ctx.store().path().display().to_string(),
            "icon_dir": ctx.session.icons().dir().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}\n", "2FAuth Launcher Status".bold());

    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    match config.connection() {
        Ok(conn) => {
            println!("{} 2FAuth URL: {}", "✓".green(), conn.base_url.cyan());
            println!("{} Access token configured", "✓".green());
        }
        Err(e @ ConfigError::MissingUrl) => {
            println!("{} {}", "✗".red(), e);
            println!("  → Run 'twofauth init' to configure");
        }
        Err(e) => {
            if let Some(url) = &config.url {
                println!("{} 2FAuth URL: {}", "✓".green(), url.cyan());
            }
            println!("{} {}", "✗".red(), e);
        }
    }

    println!(
        "{} Keyword '{}', recent list holds {}",
        "○".dimmed(),
        config.keyword,
        ctx.session.recent().capacity()
    );
    println!();

    let count = cache.accounts().len();
    let age = format_age(cache.updated_at(), now);
    if cache.is_stale(now) {
        println!(
            "{} {} cached accounts, updated {} (stale, will refresh on next query)",
            "⚠".yellow(),
            count,
            age
        );
    } else {
        println!(
            "{} {} cached accounts, updated {} (expires after {})",
            "✓".green(),
            count,
            age,
            format_duration(cache.expiry())
        );
    }
    println!("Snapshot:  {}", ctx.store().path().display().to_string().dimmed());
    println!("Icons:     {}", ctx.session.icons().dir().display().to_string().dimmed());
    println!();

    Ok(())
}
