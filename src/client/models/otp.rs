//! One-time password model

use serde::{Deserialize, Serialize};

/// Current one-time password for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Otp {
    /// The password itself
    pub password: String,

    /// totp, hotp or steamtotp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_type: Option<String>,

    /// Validity period in seconds (TOTP only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
}
