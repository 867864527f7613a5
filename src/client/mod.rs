//! 2FAuth API client

use async_trait::async_trait;

use crate::config::Connection;
use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod twofauth;

pub use models::{Account, AccountId, Otp};
pub use twofauth::TwoFAuthClient;

/// The slice of the 2FAuth API the launcher consumes.
///
/// Connection parameters are passed per call so that a settings change takes
/// effect on the next request without rebuilding the client.
#[async_trait]
pub trait TwoFAuthApi: Send + Sync {
    /// List all accounts visible to the token (`GET /api/v1/twofaccounts`)
    async fn list_accounts(&self, conn: &Connection) -> Result<Vec<Account>>;

    /// Fetch the current OTP for an account (`GET /api/v1/twofaccounts/{id}/otp`)
    async fn get_otp(&self, conn: &Connection, id: &AccountId) -> Result<Otp>;

    /// Download an account icon (`GET /storage/icons/{icon}`, unauthenticated)
    async fn fetch_icon(&self, conn: &Connection, icon: &str) -> Result<Vec<u8>>;
}
