//! Market data providers
//!
//! Each provider turns one HTTP source into normalized candles. The
//! [`ProviderChain`] tries them in priority order behind the candle cache.

pub mod chain;
pub mod coingecko;
pub mod coinpaprika;
pub mod cryptocompare;

pub use chain::*;
pub use coingecko::*;
pub use coinpaprika::*;
pub use cryptocompare::*;

use crate::data::{Asset, Candle, Timeframe};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Per-request socket timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Decode(String),
    #[error("no candles returned")]
    Empty,
    #[error("provider credentials are not configured")]
    MissingCredentials,
}

/// One market data source
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// False when the provider lacks the credentials it needs
    fn is_enabled(&self) -> bool {
        true
    }

    /// Fetch up to `limit` candles; the chain normalizes and truncates the result
    async fn fetch(
        &self,
        asset: &Asset,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}

/// Build the HTTP client shared by the providers
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ProviderError::Transport)
}

/// Send a request and return the body, mapping 429 to [`ProviderError::RateLimited`]
pub(crate) async fn send(request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited);
    }
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))
}

// below this a numeric timestamp is taken to be seconds (1e11 s is year 5138)
const SECONDS_CUTOFF: f64 = 1e11;

/// Normalize a provider timestamp (seconds, milliseconds, numeric string or
/// ISO-8601) to epoch milliseconds.
pub fn normalize_timestamp(value: &Value) -> Result<i64, ProviderError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(numeric_millis)
            .ok_or_else(|| ProviderError::Decode(format!("bad timestamp {n}"))),
        Value::String(s) => {
            if let Ok(n) = s.trim().parse::<f64>() {
                return Ok(numeric_millis(n));
            }
            DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.timestamp_millis())
                .map_err(|e| ProviderError::Decode(format!("bad timestamp {s:?}: {e}")))
        }
        other => Err(ProviderError::Decode(format!("bad timestamp {other}"))),
    }
}

fn numeric_millis(n: f64) -> i64 {
    if n.abs() < SECONDS_CUTOFF {
        (n * 1000.0).round() as i64
    } else {
        n.round() as i64
    }
}
