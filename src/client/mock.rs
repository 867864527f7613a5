//! Mock 2FAuth API client for testing
//!
//! Provides a mock implementation of [`TwoFAuthApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{Account, AccountId, Otp, TwoFAuthApi};
use crate::config::Connection;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockTwoFAuthClient::new()
///     .with_accounts(vec![account(1, "GitHub", "alice")])
///     .with_otp("123456");
///
/// let accounts = mock.list_accounts(&conn).await?;
/// assert_eq!(accounts.len(), 1);
/// ```
#[derive(Default)]
pub struct MockTwoFAuthClient {
    /// Accounts to return from list_accounts
    accounts: Arc<Mutex<Vec<Account>>>,
    /// Password to return from get_otp
    otp: Arc<Mutex<Option<String>>>,
    /// Icon bytes keyed by filename; missing names fail with a network error
    icons: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    /// Error for the next list_accounts call - consumed on first use
    list_error: Arc<Mutex<Option<ApiError>>>,
    /// Error for the next get_otp call - consumed on first use
    otp_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Connections seen by each call, in order
    connections: Arc<Mutex<Vec<Connection>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_accounts: usize,
    pub get_otp: usize,
    pub fetch_icon: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_accounts + self.get_otp + self.fetch_icon
    }
}

impl MockTwoFAuthClient {
    /// Create a new mock client with empty responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure accounts to return from list_accounts.
    pub fn with_accounts(self, accounts: Vec<Account>) -> Self {
        *self.accounts.try_lock().expect("fresh mock") = accounts;
        self
    }

    /// Configure the password returned by get_otp.
    pub fn with_otp(self, password: &str) -> Self {
        *self.otp.try_lock().expect("fresh mock") = Some(password.to_string());
        self
    }

    /// Configure bytes served for an icon filename.
    pub fn with_icon(self, name: &str, bytes: &[u8]) -> Self {
        self.icons
            .try_lock()
            .expect("fresh mock")
            .insert(name.to_string(), bytes.to_vec());
        self
    }

    /// Replace the accounts returned by subsequent list_accounts calls.
    pub async fn set_accounts(&self, accounts: Vec<Account>) {
        *self.accounts.lock().await = accounts;
    }

    /// Make the next list_accounts call fail.
    pub async fn fail_next_list(&self, error: ApiError) {
        *self.list_error.lock().await = Some(error);
    }

    /// Make the next get_otp call fail.
    pub async fn fail_next_otp(&self, error: ApiError) {
        *self.otp_error.lock().await = Some(error);
    }

    /// Get call counts for verification.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Connections used by calls so far.
    pub async fn connections(&self) -> Vec<Connection> {
        self.connections.lock().await.clone()
    }
}

#[async_trait]
impl TwoFAuthApi for MockTwoFAuthClient {
    async fn list_accounts(&self, conn: &Connection) -> Result<Vec<Account>> {
        self.call_count.lock().await.list_accounts += 1;
        self.connections.lock().await.push(conn.clone());

        if let Some(err) = self.list_error.lock().await.take() {
            return Err(err.into());
        }

        Ok(self.accounts.lock().await.clone())
    }

    async fn get_otp(&self, conn: &Connection, id: &AccountId) -> Result<Otp> {
        self.call_count.lock().await.get_otp += 1;
        self.connections.lock().await.push(conn.clone());

        if let Some(err) = self.otp_error.lock().await.take() {
            return Err(err.into());
        }

        match self.otp.lock().await.clone() {
            Some(password) => Ok(Otp {
                password,
                otp_type: Some("totp".to_string()),
                period: Some(30),
            }),
            None => Err(ApiError::Service(format!("No query results for model [TwoFAccount] {}", id)).into()),
        }
    }

    async fn fetch_icon(&self, conn: &Connection, icon: &str) -> Result<Vec<u8>> {
        self.call_count.lock().await.fetch_icon += 1;
        self.connections.lock().await.push(conn.clone());

        self.icons
            .lock()
            .await
            .get(icon)
            .cloned()
            .ok_or_else(|| ApiError::Network(format!("Icon download failed: {}", icon)).into())
    }
}

/// Build an account fixture.
pub fn account(id: u64, service: &str, name: &str) -> Account {
    Account {
        id: AccountId::Number(id),
        service: service.to_string(),
        account: name.to_string(),
        icon: None,
    }
}

/// Build an account fixture with an icon reference.
pub fn account_with_icon(id: u64, service: &str, name: &str, icon: &str) -> Account {
    Account {
        icon: Some(icon.to_string()),
        ..account(id, service, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        Connection {
            base_url: "https://2fa.test".to_string(),
            token: "pat".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_list_accounts() {
        let mock = MockTwoFAuthClient::new().with_accounts(vec![account(1, "GitHub", "alice")]);

        let accounts = mock.list_accounts(&conn()).await.unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(mock.call_counts().await.list_accounts, 1);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockTwoFAuthClient::new();
        mock.fail_next_list(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.list_accounts(&conn()).await.is_err());
        assert!(mock.list_accounts(&conn()).await.is_ok());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_icons() {
        let mock = MockTwoFAuthClient::new().with_icon("a.png", b"png");

        assert_eq!(mock.fetch_icon(&conn(), "a.png").await.unwrap(), b"png");
        assert!(mock.fetch_icon(&conn(), "b.png").await.is_err());
    }
}
