//! Global CLI options shared across all commands

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// For connection settings the precedence is: CLI flag > environment
/// variable > config file > default. This struct captures the CLI/env layer;
/// the config file is merged in `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.twofauth/config.yaml)
    pub config: Option<String>,

    /// 2FAuth base URL override
    pub url: Option<String>,

    /// Access token override
    pub token: Option<String>,

    /// Cache directory override
    pub cache_dir: Option<PathBuf>,

    /// Ignore the saved snapshot
    pub no_cache: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            url: cli.url.clone(),
            token: cli.token.clone(),
            cache_dir: cli.cache_dir.as_ref().map(PathBuf::from),
            no_cache: cli.no_cache,
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
