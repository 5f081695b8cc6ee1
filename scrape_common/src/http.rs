//! Blocking HTTP clients for the chat channel and the leaderboard API.
//!
//! Both clients take their configuration explicitly at construction time and
//! issue exactly one request per call. Nothing is retried: a non-success status
//! is surfaced as [`ScrapeError::Status`] and the caller decides whether to skip.
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::error::ScrapeError;
use crate::leaderboard::{LeaderboardEntry, LeaderboardKind, PageSource};
use crate::message::Message;
use crate::result::Result;

/// Channel carrying the spawner price lists.
pub const DEFAULT_CHANNEL_ID: &str = "1373579452998746155";
/// Chat REST API root.
pub const DEFAULT_CHAT_API: &str = "https://discord.com/api/v9";
/// Leaderboard REST API root.
pub const DEFAULT_LEADERBOARD_API: &str = "https://api.donutsmp.net/v1/leaderboards";
/// Browser user agent sent to the chat API.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Settings for reading a chat channel.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Value of the `Authorization` header.
    pub token: String,
    /// Channel to read.
    pub channel_id: String,
    /// API root, without trailing slash.
    pub api_base: String,
    /// Number of most recent messages to request.
    pub limit: u32,
}

impl ChatConfig {
    /// URL of the channel's message list.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/channels/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.channel_id
        )
    }
}

/// Settings for the leaderboard API.
#[derive(Debug, Clone)]
pub struct LeaderboardConfig {
    /// Value of the `Authorization` header.
    pub api_key: String,
    /// API root, without trailing slash.
    pub api_base: String,
}

impl LeaderboardConfig {
    /// URL of one leaderboard page.
    pub fn page_url(&self, kind: LeaderboardKind, page: u32) -> String {
        format!("{}/{}/{}", self.api_base.trim_end_matches('/'), kind, page)
    }
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::MissingConfig(String::from(what)));
    }
    Ok(())
}

/// Turns a non-success response into [`ScrapeError::Status`].
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ScrapeError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Reads recent messages from a chat channel.
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Creates a client. Fails if the token or channel id is empty.
    pub fn new(config: ChatConfig) -> Result<Self> {
        require(&config.token, "chat token (DISCORD_TOKEN)")?;
        require(&config.channel_id, "channel id")?;
        let client = Client::builder().user_agent(BROWSER_USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// Channel this client reads.
    pub fn channel_id(&self) -> &str {
        &self.config.channel_id
    }

    /// Fetches the `limit` most recent messages, newest first.
    pub fn fetch_messages(&self) -> Result<Vec<Message>> {
        let url = self.config.messages_url();
        debug!("GET {} (limit={})", url, self.config.limit);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.config.token)
            .header(CONTENT_TYPE, "application/json")
            .query(&[("limit", self.config.limit)])
            .send()?;
        let messages = check_status(response)?.json::<Vec<Message>>()?;
        Ok(messages)
    }
}

/// Body of a leaderboard page response.
#[derive(Deserialize)]
struct LeaderboardPage {
    #[serde(default)]
    result: Option<Vec<LeaderboardEntry>>,
}

/// Reads leaderboard pages from the game server API.
pub struct LeaderboardClient {
    client: Client,
    config: LeaderboardConfig,
}

impl LeaderboardClient {
    /// Creates a client. Fails if the API key is empty.
    pub fn new(config: LeaderboardConfig) -> Result<Self> {
        require(&config.api_key, "leaderboard API key (DONUT_API_KEY)")?;
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

impl PageSource for LeaderboardClient {
    fn fetch_page(&self, kind: LeaderboardKind, page: u32) -> Result<Vec<LeaderboardEntry>> {
        let url = self.config.page_url(kind, page);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.config.api_key)
            .send()?;
        let body = check_status(response)?.json::<LeaderboardPage>()?;
        Ok(body.result.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{PagingPolicy, collect_money};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_config(token: &str) -> ChatConfig {
        ChatConfig {
            token: String::from(token),
            channel_id: String::from(DEFAULT_CHANNEL_ID),
            api_base: String::from("https://discord.com/api/v9/"),
            limit: 10,
        }
    }

    #[test]
    fn test_messages_url() {
        assert_eq!(
            chat_config("t").messages_url(),
            "https://discord.com/api/v9/channels/1373579452998746155/messages"
        );
    }

    #[test]
    fn test_page_url() {
        let config = LeaderboardConfig {
            api_key: String::from("k"),
            api_base: String::from(DEFAULT_LEADERBOARD_API),
        };
        assert_eq!(
            config.page_url(LeaderboardKind::MobsKilled, 3),
            "https://api.donutsmp.net/v1/leaderboards/mobskilled/3"
        );
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = ChatClient::new(chat_config("  ")).err().unwrap();
        assert!(matches!(err, ScrapeError::MissingConfig(_)));

        let err = LeaderboardClient::new(LeaderboardConfig {
            api_key: String::new(),
            api_base: String::from(DEFAULT_LEADERBOARD_API),
        })
        .err()
        .unwrap();
        assert!(matches!(err, ScrapeError::MissingConfig(_)));
    }

    #[test]
    fn test_page_body_without_result() {
        let body: LeaderboardPage = serde_json::from_str(r#"{"status": 200}"#).unwrap();
        assert!(body.result.is_none());
        let body: LeaderboardPage =
            serde_json::from_str(r#"{"result": [{"username": "a"}]}"#).unwrap();
        assert_eq!(body.result.unwrap().len(), 1);
    }

    fn leaderboard_config(api_base: &str) -> LeaderboardConfig {
        LeaderboardConfig {
            api_key: String::from("secret-key"),
            api_base: String::from(api_base),
        }
    }

    // The blocking client owns its own runtime, so it must live and die
    // outside the async test runtime.
    async fn fetch_page_blocking(
        api_base: String,
        kind: LeaderboardKind,
        page: u32,
    ) -> Result<Vec<LeaderboardEntry>> {
        tokio::task::spawn_blocking(move || {
            LeaderboardClient::new(leaderboard_config(&api_base))?.fetch_page(kind, page)
        })
        .await
        .unwrap()
    }

    async fn fetch_messages_blocking(config: ChatConfig) -> Result<Vec<Message>> {
        tokio::task::spawn_blocking(move || ChatClient::new(config)?.fetch_messages())
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_page_sends_headers_and_reads_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kills/1"))
            .and(header("authorization", "secret-key"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "result": [{"username": "alice", "value": "12"}, {"username": "bob", "value": "9"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let rows = fetch_page_blocking(server.uri(), LeaderboardKind::Kills, 1)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["username"], "alice");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_page_without_result_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shop/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let rows = fetch_page_blocking(server.uri(), LeaderboardKind::Shop, 1)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_page_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/money/2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let err = fetch_page_blocking(server.uri(), LeaderboardKind::Money, 2)
            .await
            .unwrap_err();
        assert!(err.is_status());
        match err {
            ScrapeError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_money_page_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/money/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{"username": "alice"}, {"username": "bob"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/money/2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/money/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [{"username": "carol"}]
            })))
            .mount(&server)
            .await;

        let api_base = server.uri();
        let money = tokio::task::spawn_blocking(move || {
            let client = LeaderboardClient::new(leaderboard_config(&api_base))?;
            let policy = PagingPolicy {
                money_pages: 3,
                top_n: 10,
                delay: Duration::ZERO,
            };
            Ok::<_, ScrapeError>(collect_money(&client, &policy))
        })
        .await
        .unwrap()
        .unwrap();

        let names: Vec<&str> = money.iter().filter_map(|r| r["username"].as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_messages_sends_headers_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/1373579452998746155/messages"))
            .and(query_param("limit", "10"))
            .and(header("authorization", "secret-token"))
            .and(header("content-type", "application/json"))
            .and(header("user-agent", BROWSER_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "2",
                    "content": "Buying (you sell to us)\n- Skeleton Spawners **1.2m** each",
                    "timestamp": "2025-06-02T09:30:00.000000+00:00",
                    "author": {"id": "42", "username": "shopkeeper"}
                },
                {"id": "1", "content": "hello", "timestamp": "2025-06-01T09:30:00.000000+00:00"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = chat_config("secret-token");
        config.api_base = server.uri();
        let messages = fetch_messages_blocking(config).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, "shopkeeper");
        assert_eq!(messages[1].author, "unknown");
        assert!(messages[0].body.contains("Skeleton Spawners"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_messages_unauthorized_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels/1373579452998746155/messages"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"message": "401: Unauthorized"}"#),
            )
            .mount(&server)
            .await;

        let mut config = chat_config("bad-token");
        config.api_base = server.uri();
        let err = fetch_messages_blocking(config).await.unwrap_err();
        assert!(err.is_status());
        assert!(matches!(err, ScrapeError::Status { status: 401, .. }));
    }
}
