//! In-memory candle cache
//!
//! Entries live for the lifetime of the owning pipeline: no TTL and no
//! eviction, so a long-running process serves increasingly stale series for
//! pairs it has already seen.

use crate::data::{Candle, Symbol, Timeframe};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Cache key: (symbol, timeframe, candle count)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub limit: usize,
}

impl CacheKey {
    pub fn new(symbol: &Symbol, timeframe: Timeframe, limit: usize) -> Self {
        Self {
            symbol: symbol.clone(),
            timeframe,
            limit,
        }
    }
}

/// Candle series memoized by [`CacheKey`]
#[derive(Debug, Default)]
pub struct CandleCache {
    entries: RwLock<HashMap<CacheKey, Vec<Candle>>>,
}

impl CandleCache {
    /// Create new cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached series
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<Candle>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a series, overwriting any previous entry for the key
    pub async fn insert(&self, key: CacheKey, candles: Vec<Candle>) {
        self.entries.write().await.insert(key, candles);
    }

    /// Number of cached series
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_keys_include_limit() {
        let cache = CandleCache::new();
        let btc = Symbol::new("BTC");
        let candle = Candle::new(0, 1.0, 1.0, 1.0, 1.0, 0.0);

        cache
            .insert(CacheKey::new(&btc, Timeframe::Hour, 100), vec![candle])
            .await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&CacheKey::new(&btc, Timeframe::Hour, 100)).await.is_some());
        assert!(cache.get(&CacheKey::new(&btc, Timeframe::Hour, 50)).await.is_none());
    }
}
