//! Account models

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque account identifier.
///
/// 2FAuth uses integers, but the launcher treats ids as opaque so string ids
/// are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(u64),
    Text(String),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Number(n) => write!(f, "{}", n),
            AccountId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for AccountId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => AccountId::Number(n),
            Err(_) => AccountId::Text(s.to_string()),
        })
    }
}

impl From<u64> for AccountId {
    fn from(n: u64) -> Self {
        AccountId::Number(n)
    }
}

/// A second-factor account as listed by `/api/v1/twofaccounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: AccountId,

    /// Service name (e.g. "GitHub")
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service: String,

    /// Account name or username
    #[serde(default, deserialize_with = "null_as_empty")]
    pub account: String,

    /// Icon filename under `/storage/icons`
    #[serde(default)]
    pub icon: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
