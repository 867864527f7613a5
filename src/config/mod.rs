//! Configuration management for the 2FAuth launcher

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default activation keyword
pub const DEFAULT_KEYWORD: &str = "2fa";

/// Launcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the 2FAuth instance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Personal access token (sent as a bearer token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Keyword that activates the launcher
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Hours before the cached account list is considered stale
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: f64,

    /// Number of recently used accounts to remember
    #[serde(default = "default_recent_max")]
    pub recent_max: usize,

    /// Override for the icon cache directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_dir: Option<PathBuf>,
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.to_string()
}

fn default_expiry_hours() -> f64 {
    24.0
}

fn default_recent_max() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            keyword: default_keyword(),
            expiry_hours: default_expiry_hours(),
            recent_max: default_recent_max(),
            icon_dir: None,
        }
    }
}

/// Resolved connection parameters for the 2FAuth API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub base_url: String,
    pub token: String,
}

/// A single setting that can be changed at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKey {
    /// 2FAuth base URL
    Url,
    /// Personal access token
    Token,
    /// Activation keyword
    Keyword,
    /// Cache expiry in hours
    Expiry,
    /// Size of the recent accounts list
    RecentMax,
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SettingKey::Url => "url",
            SettingKey::Token => "token",
            SettingKey::Keyword => "keyword",
            SettingKey::Expiry => "expiry",
            SettingKey::RecentMax => "recent-max",
        };
        f.write_str(name)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(".twofauth").join("config.yaml"))
    }

    /// Resolve an optional override to the effective config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when no file exists yet
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        match Self::load_from(&path) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(&Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file carries a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Resolve the connection parameters, failing if either is unset.
    ///
    /// Blank values count as unset. The URL is checked before the token.
    pub fn connection(&self) -> std::result::Result<Connection, ConfigError> {
        let base_url = non_blank(self.url.as_deref())
            .ok_or(ConfigError::MissingUrl)?
            .trim_end_matches('/')
            .to_string();
        let token = non_blank(self.token.as_deref())
            .ok_or(ConfigError::MissingToken)?
            .to_string();

        Ok(Connection { base_url, token })
    }

    /// Cache expiry as a duration
    pub fn expiry(&self) -> chrono::Duration {
        let millis = (self.expiry_hours.max(0.0) * 3_600_000.0) as i64;
        chrono::Duration::milliseconds(millis)
    }

    /// Apply a single setting change.
    ///
    /// The config is left untouched when the value does not parse.
    pub fn apply(&mut self, key: SettingKey, value: &str) -> std::result::Result<(), ConfigError> {
        match key {
            SettingKey::Url => self.url = Some(value.trim().to_string()),
            SettingKey::Token => self.token = Some(value.trim().to_string()),
            SettingKey::Keyword => self.keyword = value.trim().to_string(),
            SettingKey::Expiry => {
                let hours: f64 = value.trim().parse().map_err(|_| {
                    ConfigError::Invalid(format!("expiry must be a number of hours, got '{value}'"))
                })?;
                if !hours.is_finite() || hours < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "expiry must be a non-negative number of hours, got '{value}'"
                    )));
                }
                self.expiry_hours = hours;
            }
            SettingKey::RecentMax => {
                self.recent_max = value.trim().parse().map_err(|_| {
                    ConfigError::Invalid(format!(
                        "recent-max must be a non-negative integer, got '{value}'"
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Current value of a setting, with the token masked
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Url => self.url.clone().unwrap_or_default(),
            SettingKey::Token => match non_blank(self.token.as_deref()) {
                Some(_) => "********".to_string(),
                None => String::new(),
            },
            SettingKey::Keyword => self.keyword.clone(),
            SettingKey::Expiry => self.expiry_hours.to_string(),
            SettingKey::RecentMax => self.recent_max.to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
