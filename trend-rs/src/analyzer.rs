//! Fetch, score and select: the end-to-end signal pipeline

use crate::data::{Symbol, Timeframe};
use crate::providers::{ProviderChain, ProviderStatus};
use crate::sentiment::SentimentEngine;
use crate::strategy::{select_best, DecisionEngine, Opportunity, TrendResult};
use tracing::info;

pub struct TrendAnalyzer {
    chain: ProviderChain,
    decision: DecisionEngine,
    timeframe: Timeframe,
    limit: usize,
}

impl TrendAnalyzer {
    pub fn new(chain: ProviderChain, sentiment: SentimentEngine, limit: usize) -> Self {
        Self {
            chain,
            decision: DecisionEngine::new(sentiment),
            timeframe: Timeframe::Hour,
            limit,
        }
    }

    pub fn provider_statuses(&self) -> Vec<ProviderStatus> {
        self.chain.statuses()
    }

    /// Scored result for one symbol, or `None` when no provider had data
    pub async fn analyze(&self, symbol: &Symbol) -> Option<TrendResult> {
        let candles = self.chain.fetch_candles(symbol, self.timeframe, self.limit).await?;
        Some(self.decision.decide(symbol, &candles).await)
    }

    /// Scan `universe` in order and return the strongest result, or `None`
    /// when no symbol produced one.
    pub async fn best_opportunity(&self, universe: &[Symbol]) -> Option<Opportunity> {
        let mut results = Vec::with_capacity(universe.len());
        for symbol in universe {
            match self.analyze(symbol).await {
                Some(result) => results.push(result),
                None => info!("Skipping {}: no market data", symbol),
            }
        }
        info!("Scored {}/{} symbols", results.len(), universe.len());

        let result = select_best(results)?;
        let sentiment = self
            .decision
            .sentiment()
            .measure(&result.symbol.asset().name)
            .await;
        info!("Best opportunity: {} ({:.3})", result.symbol, result.best_score());
        Some(Opportunity { result, sentiment })
    }
}
