use dotenv::dotenv;
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_UNIVERSE: &str = "BTC,ETH,SOL,BNB,XRP,ADA,DOGE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub bot_name: String,
    /// Target chat; negative for groups/channels, positive for direct chats
    pub channel_id: i64,
    pub cryptocompare_api_key: Option<String>,
    pub reddit: Option<RedditConfig>,
    pub reddit_user_agent: String,
    pub sentiment_subreddit: String,
    pub candle_limit: usize,
    pub http_timeout: Duration,
    pub retry_backoff: Duration,
    pub symbol_universe: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from an explicit variable map
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;
        let channel_id = parse_channel_id(&get("CHANNEL_ID").ok_or(ConfigError::Missing("CHANNEL_ID"))?)?;

        let reddit = match (
            get("REDDIT_CLIENT_ID"),
            get("REDDIT_CLIENT_SECRET"),
            get("REDDIT_USERNAME"),
            get("REDDIT_PASSWORD"),
        ) {
            (Some(client_id), Some(client_secret), Some(username), Some(password)) => Some(RedditConfig {
                client_id,
                client_secret,
                username,
                password,
            }),
            _ => None,
        };

        Ok(Config {
            bot_token,
            bot_name: get("BOT_NAME").unwrap_or_else(|| "TrendSignal".to_string()),
            channel_id,
            cryptocompare_api_key: get("CRYPTOCOMPARE_API_KEY"),
            reddit,
            reddit_user_agent: get("REDDIT_USER_AGENT")
                .unwrap_or_else(|| format!("trend-signal-bot/{}", env!("CARGO_PKG_VERSION"))),
            sentiment_subreddit: get("SENTIMENT_SUBREDDIT").unwrap_or_else(|| "CryptoCurrency".to_string()),
            candle_limit: parse_positive("CANDLE_LIMIT", get("CANDLE_LIMIT"), 100)?,
            http_timeout: Duration::from_secs(parse_positive("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), 10)?),
            retry_backoff: Duration::from_millis(parse_or("RETRY_BACKOFF_MS", get("RETRY_BACKOFF_MS"), 1000)?),
            symbol_universe: get("SYMBOL_UNIVERSE")
                .unwrap_or_else(|| DEFAULT_UNIVERSE.to_string())
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

/// Chat id must be an optionally negative integer
pub fn parse_channel_id(value: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "CHANNEL_ID",
        reason,
    };
    let pattern = Regex::new(r"^-?\d+$").map_err(|e| invalid(e.to_string()))?;
    if !pattern.is_match(value) {
        return Err(invalid(format!("{value:?} is not an integer chat id")));
    }
    value.parse().map_err(|e| invalid(format!("{value:?}: {e}")))
}

fn parse_or<T: FromStr>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

/// Like [`parse_or`], rejecting zero
fn parse_positive<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let parsed = parse_or(name, value, default)?;
    if parsed == T::default() {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}
