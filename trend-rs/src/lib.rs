//! Trend-RS: multi-source trend signals for crypto pairs
//!
//! Pipeline:
//! - **Data**: candle model, pair identifiers, in-memory candle cache
//! - **Providers**: CoinGecko, CryptoCompare and CoinPaprika behind an
//!   ordered failover chain with 429 retry
//! - **Indicators**: EMA, RSI, MACD, ATR
//! - **Sentiment**: Reddit posts scored by a pluggable polarity scorer
//! - **Strategy**: long/short scoring, ATR exits, best-opportunity selection
//!
//! # Example
//!
//! ```no_run
//! use trend_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let chain = ProviderChain::standard(None, DEFAULT_TIMEOUT, RetryPolicy::default())?;
//!     let reddit = RedditSource::new(None, "CryptoCurrency", "trend-rs", DEFAULT_TIMEOUT)?;
//!     let analyzer = TrendAnalyzer::new(chain, SentimentEngine::with_lexicon(Box::new(reddit)), DEFAULT_LIMIT);
//!     if let Some(result) = analyzer.analyze(&Symbol::parse("eth")).await {
//!         println!("{} {}", result.symbol, result.direction());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod data;
pub mod indicators;
pub mod providers;
pub mod sentiment;
pub mod strategy;

pub use analyzer::TrendAnalyzer;

// Re-export commonly used types
pub mod prelude {
    pub use crate::analyzer::*;
    pub use crate::data::*;
    pub use crate::indicators::*;
    pub use crate::providers::*;
    pub use crate::sentiment::*;
    pub use crate::strategy::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
