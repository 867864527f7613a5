//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{TwoFAuthApi, TwoFAuthClient};
use crate::config::{Config, SettingKey};
use crate::error::Result;

/// Prompt for URL and token, verify them against the service, then save.
///
/// Other settings already in the config file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to the 2FAuth launcher!".bold().green());
    println!("Let's connect to your 2FAuth instance.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();

    let theme = ColorfulTheme::default();
    let mut url_prompt = Input::<String>::with_theme(&theme).with_prompt("2FAuth URL");
    if let Some(url) = opts.url.clone().or_else(|| config.url.clone()) {
        url_prompt = url_prompt.default(url);
    }
    let url = url_prompt.interact_text()?;

    let token = match &opts.token {
        Some(token) => token.clone(),
        None => Password::with_theme(&theme)
            .with_prompt("Personal access token")
            .interact()?,
    };

    config.apply(SettingKey::Url, &url)?;
    config.apply(SettingKey::Token, &token)?;
    let conn = config.connection()?;

    println!("\n{}", "Checking access...".cyan());
    let client = TwoFAuthClient::new()?;
    let accounts = client.list_accounts(&conn).await?;
    println!(
        "{} Connected, {} accounts visible",
        "✓".green(),
        accounts.len()
    );

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "twofauth status".cyan());
    println!("  {} - Search your accounts", "twofauth query github".cyan());

    Ok(())
}
