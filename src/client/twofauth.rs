//! reqwest-backed 2FAuth API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{Account, AccountId, Otp, TwoFAuthApi};
use crate::config::Connection;
use crate::error::{ApiError, ConfigError, Result};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body returned by 2FAuth (`{"message": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// A response body is either an error message or the expected data
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Error(ErrorBody),
    Data(T),
}

/// 2FAuth API client
pub struct TwoFAuthClient {
    http: HttpClient,
}

impl TwoFAuthClient {
    /// Create a new 2FAuth API client
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("twofauth-launcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http })
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, conn: &Connection, segments: &[&str]) -> Result<T> {
        let url = endpoint(&conn.base_url, segments)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&conn.token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;

        match serde_json::from_str::<Payload<T>>(&body) {
            Ok(Payload::Error(err)) => Err(ApiError::Service(err.message).into()),
            Ok(Payload::Data(data)) if status.is_success() => Ok(data),
            Err(e) if status.is_success() => Err(ApiError::InvalidResponse(format!(
                "Failed to parse response: {}",
                e
            ))
            .into()),
            _ if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            _ => Err(ApiError::Service(format!("Unexpected status code: {}", status)).into()),
        }
    }
}

#[async_trait]
impl TwoFAuthApi for TwoFAuthClient {
    async fn list_accounts(&self, conn: &Connection) -> Result<Vec<Account>> {
        self.get_json(conn, &["api", "v1", "twofaccounts"]).await
    }

    async fn get_otp(&self, conn: &Connection, id: &AccountId) -> Result<Otp> {
        let id = id.to_string();
        self.get_json(conn, &["api", "v1", "twofaccounts", &id, "otp"])
            .await
    }

    async fn fetch_icon(&self, conn: &Connection, icon: &str) -> Result<Vec<u8>> {
        let url = endpoint(&conn.base_url, &["storage", "icons", icon])?;
        log::debug!("GET {}", url);

        let response = self.http.get(url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Network(format!("Icon download failed: status {}", status)).into());
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }
}

/// Append path segments to the base URL, percent-encoding each one.
///
/// A segment can never introduce extra path levels, so ids and icon names
/// cannot redirect the request to another endpoint.
fn endpoint(base_url: &str, segments: &[&str]) -> std::result::Result<Url, ConfigError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ConfigError::Invalid(format!("invalid 2FAuth URL '{}': {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| ConfigError::Invalid(format!("invalid 2FAuth URL '{}'", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
