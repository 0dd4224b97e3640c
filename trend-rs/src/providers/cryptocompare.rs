//! CryptoCompare hourly history (requires an API key)

use crate::data::{Asset, Candle, Timeframe};
use crate::providers::{decode, normalize_timestamp, send, CandleProvider, ProviderError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const CRYPTOCOMPARE_API_URL: &str = "https://min-api.cryptocompare.com";

#[derive(Debug, Clone)]
pub struct CryptoCompare {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoResponse {
    response: String,
    #[serde(default)]
    message: String,
    data: Option<HistoData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HistoData {
    #[serde(default)]
    data: Vec<HistoRow>,
}

#[derive(Debug, Deserialize)]
struct HistoRow {
    time: Value,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volumefrom: f64,
}

impl CryptoCompare {
    /// A blank key counts as missing
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, CRYPTOCOMPARE_API_URL)
    }

    pub fn with_base_url(client: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

fn endpoint(timeframe: Timeframe) -> &'static str {
    match timeframe {
        Timeframe::Hour => "histohour",
    }
}

#[async_trait]
impl CandleProvider for CryptoCompare {
    fn name(&self) -> &str {
        "cryptocompare"
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(
        &self,
        asset: &Asset,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::MissingCredentials)?;
        let url = format!("{}/data/v2/{}", self.base_url, endpoint(timeframe));
        // `limit` counts intervals, so the response carries limit + 1 rows
        let limit = limit.saturating_sub(1).max(1).to_string();
        let body = send(
            self.client
                .get(&url)
                .header(reqwest::header::AUTHORIZATION, format!("Apikey {api_key}"))
                .query(&[("fsym", asset.base.as_str()), ("tsym", "USD"), ("limit", limit.as_str())]),
        )
        .await?;
        parse_histo(&body)
    }
}

/// `Data.Data[]` rows with second timestamps; volume is `volumefrom`.
pub fn parse_histo(body: &str) -> Result<Vec<Candle>, ProviderError> {
    let response: HistoResponse = decode(body)?;
    if response.response != "Success" {
        // rate limiting is reported in-band with HTTP 200
        if response.message.to_lowercase().contains("rate limit") {
            return Err(ProviderError::RateLimited);
        }
        return Err(ProviderError::Decode(response.message));
    }

    let rows = response.data.map(|d| d.data).unwrap_or_default();
    rows.into_iter()
        .map(|row| {
            Ok(Candle::new(
                normalize_timestamp(&row.time)?,
                row.open,
                row.high,
                row.low,
                row.close,
                row.volumefrom,
            ))
        })
        .collect()
}
