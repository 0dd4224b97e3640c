//! Reddit search as a sentiment source
//!
//! Script-app OAuth: a password grant yields a bearer token, which is then
//! used against `oauth.reddit.com` to search one subreddit for recent posts.

use crate::sentiment::{SentimentError, SentimentSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_URL: &str = "https://oauth.reddit.com";

/// Script-app credentials
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

/// Bearer tokens are reused for the life of the source and dropped on a 401.
#[derive(Debug)]
pub struct RedditSource {
    client: reqwest::Client,
    credentials: Option<RedditCredentials>,
    token: RwLock<Option<String>>,
    subreddit: String,
    user_agent: String,
    auth_url: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
}

impl Post {
    fn text(self) -> String {
        if self.selftext.is_empty() {
            self.title
        } else {
            format!("{} {}", self.title, self.selftext)
        }
    }
}

impl RedditSource {
    pub fn new(
        credentials: Option<RedditCredentials>,
        subreddit: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SentimentError::Transport)?;

        Ok(Self {
            client,
            credentials,
            token: RwLock::new(None),
            subreddit: subreddit.into(),
            user_agent: user_agent.into(),
            auth_url: AUTH_URL.to_string(),
            api_url: API_URL.to_string(),
        })
    }

    /// Point at different token and API endpoints
    pub fn with_urls(mut self, auth_url: &str, api_url: &str) -> Self {
        self.auth_url = auth_url.to_string();
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    async fn bearer(&self, credentials: &RedditCredentials) -> Result<String, SentimentError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        let token = self.access_token(credentials).await?;
        *self.token.write().await = Some(token.clone());
        info!("Obtained reddit access token");
        Ok(token)
    }

    async fn access_token(&self, credentials: &RedditCredentials) -> Result<String, SentimentError> {
        let response = self
            .client
            .post(&self.auth_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(SentimentError::Transport)?;

        if !response.status().is_success() {
            return Err(SentimentError::Auth(format!("token endpoint returned {}", response.status())));
        }

        let token: TokenResponse = response.json().await.map_err(SentimentError::Transport)?;
        match (token.access_token, token.error) {
            (Some(token), _) => Ok(token),
            (None, Some(error)) => Err(SentimentError::Auth(error)),
            (None, None) => Err(SentimentError::Auth("no access token in response".to_string())),
        }
    }
}

#[async_trait]
impl SentimentSource for RedditSource {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn recent_posts(&self, query: &str, limit: usize) -> Result<Vec<String>, SentimentError> {
        let credentials = self.credentials.as_ref().ok_or(SentimentError::MissingCredentials)?;
        let token = self.bearer(credentials).await?;

        let url = format!("{}/r/{}/search", self.api_url, self.subreddit);
        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("restrict_sr", "1"),
                ("sort", "new"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(SentimentError::Transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            *self.token.write().await = None;
        }
        if !status.is_success() {
            return Err(SentimentError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(SentimentError::Transport)?;
        let posts = parse_listing(&body)?;
        debug!("Fetched {} posts for '{}' from r/{}", posts.len(), query, self.subreddit);
        Ok(posts)
    }
}

/// Extract post texts from a search listing
pub fn parse_listing(body: &str) -> Result<Vec<String>, SentimentError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| SentimentError::Decode(e.to_string()))?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.text())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_joins_title_and_body() {
        let body = r#"{"kind":"Listing","data":{"children":[
            {"kind":"t3","data":{"title":"BTC to the moon","selftext":""}},
            {"kind":"t3","data":{"title":"Worried","selftext":"about the dump"}}
        ]}}"#;
        let posts = parse_listing(body).unwrap();
        assert_eq!(posts, vec!["BTC to the moon".to_string(), "Worried about the dump".to_string()]);
    }

    #[test]
    fn test_parse_listing_rejects_garbage() {
        assert!(matches!(parse_listing("<html>"), Err(SentimentError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let source = RedditSource::new(None, "CryptoCurrency", "test", Duration::from_secs(1)).unwrap();
        assert!(!source.has_credentials());
        let err = source.recent_posts("bitcoin", 50).await.unwrap_err();
        assert!(matches!(err, SentimentError::MissingCredentials));
    }
}
