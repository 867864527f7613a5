//! twofauth - keyword launcher backend and CLI for 2FAuth one-time passwords

use clap::Parser;
use colored::Colorize;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod query;
mod recent;
mod session;

use cli::{CacheCommands, Cli, Commands, ConfigCommands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--debug`, which wins over the default.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
    log::debug!("Debug logging enabled");
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Query { words } => cli::query::run(&opts, &words).await,
        Commands::List => cli::list::run(&opts).await,
        Commands::Otp { id } => cli::otp::run(&opts, &id).await,
        Commands::Sync => cli::sync::run(&opts).await,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Get { key } => cli::config::get(&opts, key),
            ConfigCommands::Set { key, value } => cli::config::set(&opts, key, &value).await,
        },
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Path => cli::cache::path(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
        },
        Commands::Serve => cli::serve::run(&opts).await,
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
    }
}
