//! CoinPaprika historical OHLCV (free alternate source)

use crate::data::{Asset, Candle, Timeframe};
use crate::providers::{decode, normalize_timestamp, send, CandleProvider, ProviderError};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

const COINPAPRIKA_API_URL: &str = "https://api.coinpaprika.com/v1";

#[derive(Debug, Clone)]
pub struct CoinPaprika {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OhlcvRow {
    time_open: Value,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

impl CoinPaprika {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, COINPAPRIKA_API_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CandleProvider for CoinPaprika {
    fn name(&self) -> &str {
        "coinpaprika"
    }

    async fn fetch(
        &self,
        asset: &Asset,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/coins/{}/ohlcv/historical", self.base_url, asset.coinpaprika_id);
        let now_ms = Utc::now().timestamp_millis();
        let start = (now_ms - timeframe.millis() * limit as i64) / 1000;
        let start = start.to_string();
        let limit = limit.to_string();
        let body = send(self.client.get(&url).query(&[
            ("start", start.as_str()),
            ("interval", timeframe.label()),
            ("limit", limit.as_str()),
            ("quote", "usd"),
        ]))
        .await?;
        parse_ohlcv(&body)
    }
}

/// Rows keyed by ISO-8601 `time_open`
pub fn parse_ohlcv(body: &str) -> Result<Vec<Candle>, ProviderError> {
    let rows: Vec<OhlcvRow> = decode(body)?;
    rows.into_iter()
        .map(|row| {
            Ok(Candle::new(
                normalize_timestamp(&row.time_open)?,
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume.unwrap_or(0.0),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ohlcv_iso_timestamps() {
        let body = r#"[
            {"time_open":"2023-11-14T22:00:00Z","time_close":"2023-11-14T22:59:59Z","open":36600.0,"high":37000.0,"low":36500.0,"close":36900.0,"volume":12345.0,"market_cap":1},
            {"time_open":"2023-11-14T23:00:00Z","time_close":"2023-11-14T23:59:59Z","open":36900.0,"high":37100.0,"low":36800.0,"close":37050.0,"volume":null,"market_cap":1}
        ]"#;
        let candles = parse_ohlcv(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_699_999_200_000);
        assert_eq!(candles[0].volume, 12345.0);
        assert_eq!(candles[1].timestamp, 1_700_002_800_000);
        assert_eq!(candles[1].volume, 0.0);
    }

    #[test]
    fn test_parse_ohlcv_rejects_error_object() {
        let body = r#"{"error":"id not found"}"#;
        assert!(matches!(parse_ohlcv(body), Err(ProviderError::Decode(_))));
    }
}
