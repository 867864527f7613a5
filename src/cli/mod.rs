//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::config::SettingKey;

pub mod args;
pub mod cache;
pub mod completions;
pub mod config;
pub mod context;
pub mod init;
pub mod list;
pub mod otp;
pub mod query;
pub mod serve;
pub mod status;
pub mod sync;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// twofauth - search your 2FAuth accounts and fetch one-time passwords
#[derive(Parser, Debug)]
#[command(name = "twofauth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TWOFAUTH_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TWOFAUTH_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the 2FAuth base URL
    #[arg(long, global = true, env = "TWOFAUTH_URL", hide_env = true)]
    pub url: Option<String>,

    /// Override the personal access token
    #[arg(long, global = true, env = "TWOFAUTH_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Override the cache directory (account snapshot and icons)
    #[arg(long, global = true, env = "TWOFAUTH_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TWOFAUTH_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Ignore the saved account snapshot and fetch fresh data
    #[arg(long, global = true, env = "TWOFAUTH_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactively configure the 2FAuth URL and token
    Init,

    /// Show configuration and cache status
    Status,

    /// Search accounts like the launcher does
    Query {
        /// Search words (all must match service or account name)
        words: Vec<String>,
    },

    /// List all cached accounts
    List,

    /// Fetch the current one-time password for an account
    Otp {
        /// Account ID
        id: String,
    },

    /// Refresh the account cache now
    Sync,

    /// Read or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Manage the local account snapshot
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Run as a launcher backend: JSON events on stdin, JSON responses on stdout
    Serve,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   twofauth completion bash > /etc/bash_completion.d/twofauth
  zsh:    twofauth completion zsh > \"${fpath[1]}/_twofauth\"
  fish:   twofauth completion fish > ~/.config/fish/completions/twofauth.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show one setting, or all of them
    Get {
        #[arg(value_enum)]
        key: Option<SettingKey>,
    },

    /// Change a setting (url and token changes trigger a sync)
    Set {
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show the cache directory
    Path,

    /// Delete the saved account snapshot (icons are kept)
    Clear,
}
