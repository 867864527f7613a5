//! Session controller
//!
//! Turns launcher events into result lists. The session owns the long-lived
//! state (settings, account cache, recents) and is driven one event at a
//! time through [`Session::handle`]; host adapters translate their own
//! events into [`Event`] and render the returned [`Response`].

mod items;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{AccountCache, IconStore, RefreshReport, Snapshot};
use crate::client::{Account, TwoFAuthApi};
use crate::config::{Config, SettingKey};
use crate::error::Result;
use crate::query::match_accounts;
use crate::recent::RecentAccounts;

pub use items::{ActionPayload, DisplayItem, Icon, ItemAction};

/// Input events understood by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The user typed after the keyword
    Query {
        #[serde(default)]
        query: String,
    },
    /// The user activated an item carrying a custom payload
    Action { payload: ActionPayload },
    /// Full settings, delivered once at startup
    Preferences { config: Config },
    /// A single setting changed
    SettingChanged { key: SettingKey, value: String },
}

/// Ordered result list for the launcher to render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub items: Vec<DisplayItem>,
}

impl Response {
    pub fn single(item: DisplayItem) -> Self {
        Self { items: vec![item] }
    }
}

/// Long-lived launcher state
pub struct Session {
    config: Config,
    cache: AccountCache,
    recent: RecentAccounts,
    icons: IconStore,
    /// Icon directory used when the config has no `icon_dir`
    default_icon_dir: PathBuf,
    api: Arc<dyn TwoFAuthApi>,
}

impl Session {
    /// Icons go to `config.icon_dir` when set, else to `default_icon_dir`
    pub fn new(
        config: Config,
        default_icon_dir: impl Into<PathBuf>,
        api: Arc<dyn TwoFAuthApi>,
    ) -> Self {
        let default_icon_dir = default_icon_dir.into();
        Self {
            cache: AccountCache::new(config.expiry()),
            recent: RecentAccounts::new(config.recent_max),
            icons: icon_store(&config, &default_icon_dir),
            default_icon_dir,
            config,
            api,
        }
    }

    /// Seed the cache from a saved snapshot
    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.cache = AccountCache::with_snapshot(snapshot, self.config.expiry());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &AccountCache {
        &self.cache
    }

    pub fn recent(&self) -> &RecentAccounts {
        &self.recent
    }

    pub fn icons(&self) -> &IconStore {
        &self.icons
    }

    /// Process one event to completion
    pub async fn handle(&mut self, event: Event, now: DateTime<Utc>) -> Response {
        match event {
            Event::Query { query } => self.on_query(&query, now).await,
            Event::Action {
                payload: ActionPayload::Update,
            } => self.on_sync(now).await,
            Event::Action {
                payload: ActionPayload::Fetch { account },
            } => self.on_fetch(account).await,
            Event::Preferences { config } => self.on_preferences(config, now).await,
            Event::SettingChanged { key, value } => self.on_setting(key, &value, now).await,
        }
    }

    /// Unconditional refresh of the account cache
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> Result<RefreshReport> {
        self.cache
            .refresh(self.api.as_ref(), &self.config, &self.icons, now)
            .await
    }

    /// Refresh the account cache only if it is stale
    pub async fn ensure_fresh(&mut self, now: DateTime<Utc>) -> Result<Option<RefreshReport>> {
        self.cache
            .ensure_fresh(self.api.as_ref(), &self.config, &self.icons, now)
            .await
    }

    async fn on_query(&mut self, query: &str, now: DateTime<Utc>) -> Response {
        log::debug!("2FAuth query: {:?}", query);

        let conn = match self.config.connection() {
            Ok(conn) => conn,
            Err(e) => return Response::single(DisplayItem::config_error(e)),
        };

        let mut items = Vec::new();

        if let Err(e) = self.ensure_fresh(now).await {
            items.push(DisplayItem::sync_error(e));
        }

        let matches = match_accounts(self.cache.accounts(), query);
        if !matches.is_empty() {
            items.extend(
                matches
                    .into_iter()
                    .map(|account| DisplayItem::account(account, &self.icons)),
            );
            return Response { items };
        }

        if !self.recent.is_empty() {
            log::debug!("No matches, showing {} recent accounts", self.recent.len());
        }
        items.push(DisplayItem::instructions());
        items.extend(
            self.recent
                .iter()
                .map(|account| DisplayItem::account(account, &self.icons)),
        );
        items.push(DisplayItem::sync_action());
        items.push(DisplayItem::open_website(&conn.base_url));

        Response { items }
    }

    async fn on_sync(&mut self, now: DateTime<Utc>) -> Response {
        log::debug!("2FAuth action: refresh the cache");

        match self.refresh(now).await {
            Ok(report) => Response::single(DisplayItem::sync_done(
                &self.config.keyword,
                report.accounts,
            )),
            Err(e) => Response::single(DisplayItem::sync_error(e)),
        }
    }

    async fn on_fetch(&mut self, account: Account) -> Response {
        log::info!("2FAuth action: fetch OTP for account #{}", account.id);

        let conn = self.config.connection();
        let otp = match &conn {
            Ok(conn) => self.api.get_otp(conn, &account.id).await,
            Err(e) => Err(e.clone().into()),
        };

        let mut items = Vec::with_capacity(2);
        match otp {
            Ok(otp) => items.push(DisplayItem::otp(&otp)),
            Err(e) => {
                log::error!("2FAuth error while fetching OTP: {}", e);
                items.push(DisplayItem::otp_error(e));
            }
        }
        if let Ok(conn) = &conn {
            items.push(DisplayItem::edit_account(format!(
                "{}/account/{}/edit",
                conn.base_url, account.id
            )));
        }

        // Attempts count as recent use whether or not the fetch succeeded
        self.recent.push(account);

        Response { items }
    }

    async fn on_preferences(&mut self, config: Config, now: DateTime<Utc>) -> Response {
        self.recent.set_capacity(config.recent_max);
        self.cache.set_expiry(config.expiry());
        if config.icon_dir != self.config.icon_dir {
            self.icons = icon_store(&config, &self.default_icon_dir);
            log::debug!("Icon directory is now {}", self.icons.dir().display());
        }
        self.config = config;

        match self.refresh(now).await {
            Ok(_) => Response::default(),
            Err(e) => Response::single(DisplayItem::sync_error(e)),
        }
    }

    async fn on_setting(&mut self, key: SettingKey, value: &str, now: DateTime<Utc>) -> Response {
        if let Err(e) = self.config.apply(key, value) {
            return Response::single(DisplayItem::warning("Invalid setting", e));
        }
        log::debug!("Setting {} updated", key);

        match key {
            SettingKey::Url | SettingKey::Token => {
                if let Err(e) = self.refresh(now).await {
                    return Response::single(DisplayItem::sync_error(e));
                }
            }
            SettingKey::Expiry => self.cache.set_expiry(self.config.expiry()),
            SettingKey::RecentMax => self.recent.set_capacity(self.config.recent_max),
            SettingKey::Keyword => {}
        }

        Response::default()
    }
}

fn icon_store(config: &Config, default_dir: &std::path::Path) -> IconStore {
    IconStore::new(
        config
            .icon_dir
            .clone()
            .unwrap_or_else(|| default_dir.to_path_buf()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockTwoFAuthClient, account};
    use crate::client::AccountId;
    use crate::error::ApiError;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn config() -> Config {
        Config {
            url: Some("https://2fa.test".to_string()),
            token: Some("pat".to_string()),
            ..Config::default()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn session_with(config: Config, mock: Arc<MockTwoFAuthClient>) -> (Session, TempDir) {
        let dir = TempDir::new().unwrap();
        let session = Session::new(config, dir.path(), mock);
        (session, dir)
    }

    fn titles(response: &Response) -> Vec<&str> {
        response.items.iter().map(|i| i.title.as_str()).collect()
    }

    fn query(q: &str) -> Event {
        Event::Query {
            query: q.to_string(),
        }
    }

    fn fetch(account: Account) -> Event {
        Event::Action {
            payload: ActionPayload::Fetch { account },
        }
    }

    #[tokio::test]
    async fn test_query_without_config_shows_error_only() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, _dir) = session_with(Config::default(), mock.clone());

        let response = session.handle(query("git"), t0()).await;

        assert_eq!(titles(&response), vec!["Configuration Error"]);
        assert!(response.items[0].subtitle.as_deref().unwrap().contains("URL"));
        assert_eq!(mock.call_counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_query_lists_matches() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_accounts(vec![
            account(1, "GitHub", "alice"),
            account(2, "GitLab", "bob"),
        ]));
        let (mut session, _dir) = session_with(config(), mock.clone());

        let response = session.handle(query("git ali"), t0()).await;
        assert_eq!(titles(&response), vec!["GitHub"]);

        // "a" also occurs in "GitLab", so both survive the second token
        let response = session.handle(query("git a"), t0()).await;
        assert_eq!(titles(&response), vec!["GitHub", "GitLab"]);

        assert_eq!(mock.call_counts().await.list_accounts, 1);
    }

    #[tokio::test]
    async fn test_empty_query_shows_functions() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, _dir) = session_with(config(), mock);

        let response = session.handle(query(""), t0()).await;

        assert_eq!(
            titles(&response),
            vec!["Account Search", "Sync Accounts", "Open Website"]
        );
        assert_eq!(
            response.items[2].on_enter,
            ItemAction::OpenUrl("https://2fa.test".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_query_lists_recents_between_instructions_and_sync() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_otp("123456"));
        let (mut session, _dir) = session_with(config(), mock);

        session.handle(fetch(account(1, "GitHub", "alice")), t0()).await;
        session.handle(fetch(account(2, "AWS", "root")), t0()).await;
        let response = session.handle(query(" "), t0()).await;

        assert_eq!(
            titles(&response),
            vec!["Account Search", "AWS", "GitHub", "Sync Accounts", "Open Website"]
        );
    }

    #[tokio::test]
    async fn test_refresh_error_still_shows_results() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_accounts(vec![account(1, "GitHub", "alice")]));
        let (mut session, _dir) = session_with(config(), mock.clone());
        session.handle(query("git"), t0()).await;

        mock.fail_next_list(ApiError::Network("connection reset".to_string()))
            .await;
        let later = t0() + Duration::hours(25);
        let response = session.handle(query("git"), later).await;

        assert_eq!(titles(&response), vec!["Could not sync accounts", "GitHub"]);
        assert_eq!(session.cache().updated_at(), t0());
    }

    #[tokio::test]
    async fn test_query_does_not_refetch_fresh_cache() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, _dir) = session_with(config(), mock.clone());

        session.handle(query("a"), t0()).await;
        session.handle(query("b"), t0() + Duration::hours(1)).await;

        assert_eq!(mock.call_counts().await.list_accounts, 1);
    }

    #[tokio::test]
    async fn test_sync_success_resets_query() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_accounts(vec![account(1, "GitHub", "alice")]));
        let (mut session, _dir) = session_with(config(), mock);

        let response = session
            .handle(
                Event::Action {
                    payload: ActionPayload::Update,
                },
                t0(),
            )
            .await;

        assert_eq!(titles(&response), vec!["All Done!"]);
        assert_eq!(
            response.items[0].on_enter,
            ItemAction::ResetQuery("2fa".to_string())
        );
    }

    #[tokio::test]
    async fn test_sync_failure_is_displayed() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        mock.fail_next_list(ApiError::Service("Unauthenticated.".to_string()))
            .await;
        let (mut session, _dir) = session_with(config(), mock);

        let response = session
            .handle(
                Event::Action {
                    payload: ActionPayload::Update,
                },
                t0(),
            )
            .await;

        assert_eq!(titles(&response), vec!["Could not sync accounts"]);
        assert!(response.items[0]
            .subtitle
            .as_deref()
            .unwrap()
            .contains("Unauthenticated."));
    }

    #[tokio::test]
    async fn test_fetch_shows_otp_and_edit_link() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_otp("654321"));
        let (mut session, _dir) = session_with(config(), mock);

        let response = session.handle(fetch(account(42, "GitHub", "alice")), t0()).await;

        assert_eq!(titles(&response), vec!["654321", "Edit Account"]);
        assert_eq!(
            response.items[0].on_enter,
            ItemAction::CopyToClipboard("654321".to_string())
        );
        assert_eq!(
            response.items[1].on_enter,
            ItemAction::OpenUrl("https://2fa.test/account/42/edit".to_string())
        );
        assert_eq!(session.recent().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_copyable_but_recorded() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_otp("654321"));
        mock.fail_next_otp(ApiError::Network("timed out".to_string()))
            .await;
        let (mut session, _dir) = session_with(config(), mock);

        let response = session.handle(fetch(account(42, "GitHub", "alice")), t0()).await;

        assert_eq!(titles(&response), vec!["Could not fetch OTP", "Edit Account"]);
        assert_eq!(response.items[0].on_enter, ItemAction::HideWindow);
        assert_eq!(
            session.recent().iter().next().map(|a| &a.id),
            Some(&AccountId::Number(42))
        );
    }

    #[tokio::test]
    async fn test_fetch_without_config_omits_edit_link() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_otp("654321"));
        let (mut session, _dir) = session_with(Config::default(), mock.clone());

        let response = session.handle(fetch(account(7, "GitHub", "alice")), t0()).await;

        assert_eq!(titles(&response), vec!["Could not fetch OTP"]);
        assert_eq!(mock.call_counts().await.get_otp, 0);
        assert_eq!(session.recent().len(), 1);
    }

    #[tokio::test]
    async fn test_token_change_forces_refresh_of_fresh_cache() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, _dir) = session_with(config(), mock.clone());
        session.handle(query("x"), t0()).await;
        assert!(!session.cache().is_stale(t0()));

        let later = t0() + Duration::minutes(5);
        session
            .handle(
                Event::SettingChanged {
                    key: SettingKey::Token,
                    value: "new-pat".to_string(),
                },
                later,
            )
            .await;

        assert_eq!(mock.call_counts().await.list_accounts, 2);
        assert_eq!(mock.connections().await.last().unwrap().token, "new-pat");
        assert_eq!(session.cache().updated_at(), later);
    }

    #[tokio::test]
    async fn test_recent_max_change_clears_ring() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_otp("1"));
        let (mut session, _dir) = session_with(config(), mock.clone());
        session.handle(fetch(account(1, "A", "a")), t0()).await;

        let response = session
            .handle(
                Event::SettingChanged {
                    key: SettingKey::RecentMax,
                    value: "2".to_string(),
                },
                t0(),
            )
            .await;

        assert!(response.items.is_empty());
        assert!(session.recent().is_empty());
        assert_eq!(session.recent().capacity(), 2);
        assert_eq!(mock.call_counts().await.list_accounts, 0);
    }

    #[tokio::test]
    async fn test_invalid_setting_is_reported() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, _dir) = session_with(config(), mock);

        let response = session
            .handle(
                Event::SettingChanged {
                    key: SettingKey::Expiry,
                    value: "tomorrow".to_string(),
                },
                t0(),
            )
            .await;

        assert_eq!(titles(&response), vec!["Invalid setting"]);
        assert_eq!(session.config().expiry_hours, 24.0);
    }

    #[tokio::test]
    async fn test_preferences_replace_config_and_refresh() {
        let mock = Arc::new(MockTwoFAuthClient::new().with_accounts(vec![account(1, "GitHub", "alice")]));
        let (mut session, _dir) = session_with(Config::default(), mock.clone());

        let prefs = Config {
            recent_max: 3,
            expiry_hours: 1.0,
            ..config()
        };
        let response = session.handle(Event::Preferences { config: prefs }, t0()).await;

        assert!(response.items.is_empty());
        assert_eq!(session.recent().capacity(), 3);
        assert_eq!(session.cache().expiry(), Duration::hours(1));
        assert_eq!(session.cache().accounts().len(), 1);
        assert_eq!(mock.call_counts().await.list_accounts, 1);
    }

    #[tokio::test]
    async fn test_preferences_switch_icon_dir() {
        let mock = Arc::new(MockTwoFAuthClient::new());
        let (mut session, dir) = session_with(config(), mock);
        assert_eq!(session.icons().dir(), dir.path());

        let custom = dir.path().join("custom");
        let prefs = Config {
            icon_dir: Some(custom.clone()),
            ..config()
        };
        session.handle(Event::Preferences { config: prefs }, t0()).await;
        assert_eq!(session.icons().dir(), custom);

        session.handle(Event::Preferences { config: config() }, t0()).await;
        assert_eq!(session.icons().dir(), dir.path());
    }

    #[test]
    fn test_event_wire_format() {
        let event: Event =
            serde_json::from_str(r#"{"event": "query", "query": "git hub"}"#).unwrap();
        assert_eq!(event, query("git hub"));

        let event: Event = serde_json::from_str(
            r#"{"event": "action", "payload": {"action": "fetch", "account": {"id": 1, "service": "S", "account": "a", "icon": null}}}"#,
        )
        .unwrap();
        assert_eq!(event, fetch(account(1, "S", "a")));

        let event: Event = serde_json::from_str(
            r#"{"event": "setting_changed", "key": "recent-max", "value": "3"}"#,
        )
        .unwrap();
        assert!(matches!(
            event,
            Event::SettingChanged {
                key: SettingKey::RecentMax,
                ..
            }
        ));
    }
}
