//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - launcher-style list for humans
    #[default]
    Pretty,
    /// Table format - one row per item
    Table,
    /// JSON format - structured for scripts and launchers
    Json,
}
