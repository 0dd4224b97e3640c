//! CoinGecko public market chart (no key)
//!
//! `/coins/{id}/market_chart` returns price samples whose spacing depends on
//! `days`: 5-minute for one day, hourly for 2..=90 days, daily beyond. At
//! least two days are requested and the samples are folded into buckets of the
//! requested timeframe; a series coarser than the timeframe is rejected so the
//! chain falls through to the next provider.

use crate::data::{Asset, Candle, Timeframe};
use crate::providers::{decode, normalize_timestamp, send, CandleProvider, ProviderError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Shortest span CoinGecko serves at hourly granularity
const MIN_HOURLY_DAYS: u64 = 2;

#[derive(Debug, Clone)]
pub struct CoinGecko {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<(Value, f64)>,
}

impl CoinGecko {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, COINGECKO_API_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Days of history covering `limit` buckets
fn days_for(timeframe: Timeframe, limit: usize) -> u64 {
    let span_ms = timeframe.millis() as u64 * limit as u64;
    span_ms.div_ceil(86_400_000).max(MIN_HOURLY_DAYS)
}

#[async_trait]
impl CandleProvider for CoinGecko {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch(
        &self,
        asset: &Asset,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, asset.coingecko_id);
        let days = days_for(timeframe, limit).to_string();
        let body = send(
            self.client
                .get(&url)
                .query(&[("vs_currency", "usd"), ("days", days.as_str())]),
        )
        .await?;
        parse_market_chart(&body, timeframe)
    }
}

/// Fold `prices` samples (`[timestamp_ms, price]`) into `timeframe` candles.
///
/// Each bucket opens at the previous bucket's close. CoinGecko's volumes are
/// rolling 24h totals, so volume is left at 0.
pub fn parse_market_chart(body: &str, timeframe: Timeframe) -> Result<Vec<Candle>, ProviderError> {
    let chart: MarketChart = decode(body)?;
    let mut samples = chart
        .prices
        .into_iter()
        .map(|(ts, price)| Ok((normalize_timestamp(&ts)?, price)))
        .collect::<Result<Vec<(i64, f64)>, ProviderError>>()?;
    samples.sort_by_key(|(ts, _)| *ts);

    let step = timeframe.millis();
    let mut candles: Vec<Candle> = Vec::new();
    for (ts, price) in samples {
        let bucket = ts.div_euclid(step) * step;
        match candles.last_mut() {
            Some(candle) if candle.timestamp == bucket => {
                candle.high = candle.high.max(price);
                candle.low = candle.low.min(price);
                candle.close = price;
            }
            last => {
                let open = last.map(|c| c.close).unwrap_or(price);
                candles.push(Candle::new(bucket, open, open.max(price), open.min(price), price, 0.0));
            }
        }
    }

    check_spacing(&candles, step)?;
    Ok(candles)
}

/// Reject a series whose typical gap is wider than one bucket
fn check_spacing(candles: &[Candle], step: i64) -> Result<(), ProviderError> {
    let mut gaps: Vec<i64> = candles.windows(2).map(|w| w[1].timestamp - w[0].timestamp).collect();
    if gaps.is_empty() {
        return Ok(());
    }
    gaps.sort_unstable();
    let median = gaps[gaps.len() / 2];
    if median > step {
        return Err(ProviderError::Decode(format!(
            "expected {step}ms buckets, got samples every {median}ms"
        )));
    }
    Ok(())
}
