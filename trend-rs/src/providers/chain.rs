//! Ordered provider failover behind the candle cache

use crate::data::{normalize_series, Asset, CacheKey, Candle, CandleCache, Symbol, Timeframe};
use crate::providers::{
    http_client, CandleProvider, CoinGecko, CoinPaprika, CryptoCompare, ProviderError,
};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Candles requested per symbol unless configured otherwise
pub const DEFAULT_LIMIT: usize = 100;

/// Retry policy for rate-limited (HTTP 429) responses. Other errors are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

/// Enabled/disabled state of a provider, for status reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub enabled: bool,
}

pub struct ProviderChain {
    providers: Vec<Box<dyn CandleProvider>>,
    cache: CandleCache,
    retry: RetryPolicy,
}

impl ProviderChain {
    /// Chain over `providers`, tried in the given order
    pub fn new(providers: Vec<Box<dyn CandleProvider>>, retry: RetryPolicy) -> Self {
        Self {
            providers,
            cache: CandleCache::new(),
            retry,
        }
    }

    /// CoinGecko, then CryptoCompare (only with a key), then CoinPaprika
    pub fn standard(
        cryptocompare_key: Option<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ProviderError> {
        let client = http_client(timeout)?;
        let providers: Vec<Box<dyn CandleProvider>> = vec![
            Box::new(CoinGecko::new(client.clone())),
            Box::new(CryptoCompare::new(client.clone(), cryptocompare_key)),
            Box::new(CoinPaprika::new(client)),
        ];
        Ok(Self::new(providers, retry))
    }

    pub fn statuses(&self) -> Vec<ProviderStatus> {
        self.providers
            .iter()
            .map(|p| ProviderStatus {
                name: p.name().to_string(),
                enabled: p.is_enabled(),
            })
            .collect()
    }

    pub fn cache(&self) -> &CandleCache {
        &self.cache
    }

    /// Last `limit` candles for `symbol`, or `None` when every provider failed.
    pub async fn fetch_candles(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        limit: usize,
    ) -> Option<Vec<Candle>> {
        let key = CacheKey::new(symbol, timeframe, limit);
        if let Some(candles) = self.cache.get(&key).await {
            debug!("Cache hit for {} {} x{}", symbol, timeframe, limit);
            return Some(candles);
        }

        let asset = symbol.asset();
        for provider in &self.providers {
            if !provider.is_enabled() {
                info!("Skipping provider {}: not configured", provider.name());
                continue;
            }

            match self.fetch_with_retry(provider.as_ref(), &asset, timeframe, limit).await {
                Ok(candles) => {
                    info!("Fetched {} candles for {} from {}", candles.len(), symbol, provider.name());
                    self.cache.insert(key, candles.clone()).await;
                    return Some(candles);
                }
                Err(e) => {
                    warn!("Provider {} failed for {}: {}", provider.name(), symbol, e);
                }
            }
        }

        warn!("No provider returned candles for {}", symbol);
        None
    }

    async fn fetch_with_retry(
        &self,
        provider: &dyn CandleProvider,
        asset: &Asset,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let mut attempt = 1;
        let raw = loop {
            match provider.fetch(asset, timeframe, limit).await {
                Err(ProviderError::RateLimited) if attempt < self.retry.max_attempts => {
                    debug!(
                        "{} rate limited (attempt {}/{}), retrying in {:?}",
                        provider.name(),
                        attempt,
                        self.retry.max_attempts,
                        self.retry.backoff
                    );
                    tokio::time::sleep(self.retry.backoff).await;
                    attempt += 1;
                }
                result => break result?,
            }
        };

        let candles = normalize_series(raw, limit);
        if candles.is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(candles)
    }
}
