//! Indicator + sentiment scoring
//!
//! Points per side (max 1.0 each):
//!
//! | Signal    | Long                 | Short                |
//! |-----------|----------------------|----------------------|
//! | EMA 12/26 | fast > slow: 0.3     | fast < slow: 0.3     |
//! | RSI 14    | below 70: 0.2        | above 30: 0.2        |
//! | MACD      | line > signal: 0.3   | line < signal: 0.3   |
//! | Sentiment | positive: 0.2        | negative: 0.2        |
//!
//! Both sides are then scaled by `1 / (1 + ATR / price)`.

use crate::data::{Candle, Symbol};
use crate::indicators::{compute_indicators, IndicatorSnapshot};
use crate::sentiment::{Sentiment, SentimentEngine, SentimentReading};
use crate::strategy::{Direction, TrendResult};
use tracing::{debug, info};

pub const EMA_POINTS: f64 = 0.3;
pub const RSI_POINTS: f64 = 0.2;
pub const MACD_POINTS: f64 = 0.3;
pub const SENTIMENT_POINTS: f64 = 0.2;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Stop-loss distance in ATRs
pub const STOP_LOSS_ATR: f64 = 1.5;
/// Take-profit distance in ATRs (1:2 risk/reward)
pub const TAKE_PROFIT_ATR: f64 = 3.0;

/// Raw (long, short) points before volatility dampening
pub fn score_points(snapshot: &IndicatorSnapshot, sentiment: Sentiment) -> (f64, f64) {
    let mut long = 0.0;
    let mut short = 0.0;

    if snapshot.ema_fast > snapshot.ema_slow {
        long += EMA_POINTS;
    } else if snapshot.ema_fast < snapshot.ema_slow {
        short += EMA_POINTS;
    }

    // independent thresholds; both fire for 30 < RSI < 70
    if snapshot.rsi < RSI_OVERBOUGHT {
        long += RSI_POINTS;
    }
    if snapshot.rsi > RSI_OVERSOLD {
        short += RSI_POINTS;
    }

    // no signal line yet (26..34 candles) scores nothing
    if let Some(signal) = snapshot.macd_signal {
        if snapshot.macd > signal {
            long += MACD_POINTS;
        } else if snapshot.macd < signal {
            short += MACD_POINTS;
        }
    }

    match sentiment {
        Sentiment::Positive => long += SENTIMENT_POINTS,
        Sentiment::Negative => short += SENTIMENT_POINTS,
        Sentiment::Neutral => {}
    }

    (long, short)
}

/// `1 / (1 + atr / price)`, in (0, 1]. A non-positive price disables dampening.
pub fn volatility_multiplier(atr: f64, price: f64) -> f64 {
    if !(price > 0.0) || !atr.is_finite() {
        return 1.0;
    }
    1.0 / (1.0 + atr.max(0.0) / price)
}

/// (stop loss, take profit) around `price` for the favored direction
pub fn risk_levels(price: f64, atr: f64, direction: Direction) -> (Option<f64>, Option<f64>) {
    match direction {
        Direction::Long => (
            Some(price - STOP_LOSS_ATR * atr),
            Some(price + TAKE_PROFIT_ATR * atr),
        ),
        Direction::Short => (
            Some(price + STOP_LOSS_ATR * atr),
            Some(price - TAKE_PROFIT_ATR * atr),
        ),
        Direction::Hold => (None, None),
    }
}

/// Score a candle series against an already-measured sentiment.
pub fn score(symbol: &Symbol, candles: &[Candle], sentiment: Option<SentimentReading>) -> TrendResult {
    match compute_indicators(candles) {
        Ok(snapshot) => score_snapshot(symbol, snapshot, sentiment),
        Err(e) => {
            debug!("{}: {}, neutral result", symbol, e);
            TrendResult::neutral(symbol.clone())
        }
    }
}

/// Score an indicator snapshot that has already been computed.
pub fn score_snapshot(
    symbol: &Symbol,
    snapshot: IndicatorSnapshot,
    sentiment: Option<SentimentReading>,
) -> TrendResult {
    let bucket = sentiment.map(|r| r.sentiment).unwrap_or(Sentiment::Neutral);
    let (long, short) = score_points(&snapshot, bucket);
    let multiplier = volatility_multiplier(snapshot.atr, snapshot.price);

    let mut result = TrendResult {
        symbol: symbol.clone(),
        long_score: (long * multiplier).clamp(0.0, 1.0),
        short_score: (short * multiplier).clamp(0.0, 1.0),
        stop_loss: None,
        take_profit: None,
        atr: snapshot.atr,
        indicators: Some(snapshot),
        sentiment,
    };
    let (stop_loss, take_profit) = risk_levels(snapshot.price, snapshot.atr, result.direction());
    result.stop_loss = stop_loss;
    result.take_profit = take_profit;
    result
}

/// Scores symbols, pulling sentiment for each scored series
pub struct DecisionEngine {
    sentiment: SentimentEngine,
}

impl DecisionEngine {
    pub fn new(sentiment: SentimentEngine) -> Self {
        Self { sentiment }
    }

    pub fn sentiment(&self) -> &SentimentEngine {
        &self.sentiment
    }

    /// Score `candles` for `symbol`. Sentiment is only fetched when the series
    /// is long enough to be scored.
    pub async fn decide(&self, symbol: &Symbol, candles: &[Candle]) -> TrendResult {
        let snapshot = match compute_indicators(candles) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                info!("{}: {}, returning neutral result", symbol, e);
                return TrendResult::neutral(symbol.clone());
            }
        };

        let reading = self.sentiment.measure(&symbol.asset().name).await;
        let result = score_snapshot(symbol, snapshot, Some(reading));
        info!(
            "{}: {} long={:.3} short={:.3} atr={:.4}",
            symbol,
            result.direction(),
            result.long_score,
            result.short_score,
            result.atr
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(ema_fast: f64, ema_slow: f64, rsi: f64, macd: f64, signal: Option<f64>) -> IndicatorSnapshot {
        IndicatorSnapshot {
            price: 100.0,
            ema_fast,
            ema_slow,
            rsi,
            macd,
            macd_signal: signal,
            atr: 2.0,
        }
    }

    #[test]
    fn test_all_long_points() {
        let s = snapshot(101.0, 100.0, 25.0, 1.0, Some(0.5));
        let (long, short) = score_points(&s, Sentiment::Positive);
        assert!((long - 1.0).abs() < 1e-12);
        assert_eq!(short, 0.0);
    }

    #[test]
    fn test_rsi_thresholds_are_independent() {
        let mid = snapshot(100.0, 100.0, 50.0, 0.0, Some(0.0));
        assert_eq!(score_points(&mid, Sentiment::Neutral), (0.2, 0.2));

        let overbought = snapshot(100.0, 100.0, 80.0, 0.0, Some(0.0));
        assert_eq!(score_points(&overbought, Sentiment::Neutral), (0.0, 0.2));

        let oversold = snapshot(100.0, 100.0, 20.0, 0.0, Some(0.0));
        assert_eq!(score_points(&oversold, Sentiment::Neutral), (0.2, 0.0));
    }

    #[test]
    fn test_missing_signal_line_scores_nothing() {
        let s = snapshot(100.0, 100.0, 80.0, 5.0, None);
        assert_eq!(score_points(&s, Sentiment::Negative), (0.0, 0.4));
    }

    #[test]
    fn test_volatility_multiplier_range() {
        assert_eq!(volatility_multiplier(0.0, 100.0), 1.0);
        assert_eq!(volatility_multiplier(100.0, 100.0), 0.5);
        assert_eq!(volatility_multiplier(5.0, 0.0), 1.0);
        let m = volatility_multiplier(1e9, 1.0);
        assert!(m > 0.0 && m <= 1.0);
    }

    #[test]
    fn test_risk_levels_two_to_one() {
        assert_eq!(risk_levels(100.0, 2.0, Direction::Long), (Some(97.0), Some(106.0)));
        assert_eq!(risk_levels(100.0, 2.0, Direction::Short), (Some(103.0), Some(94.0)));
        assert_eq!(risk_levels(100.0, 2.0, Direction::Hold), (None, None));
    }

    #[test]
    fn test_short_series_is_neutral() {
        let candles: Vec<Candle> = (0..25)
            .map(|i| Candle::new(i, 100.0, 101.0, 99.0, 100.0, 1.0))
            .collect();
        let result = score(&Symbol::new("BTC"), &candles, None);
        assert_eq!(result, TrendResult::neutral(Symbol::new("BTC")));
        assert_eq!(result.direction(), Direction::Hold);
    }

    #[test]
    fn test_snapshot_scoring_matches_series_scoring() {
        let candles: Vec<Candle> = (0..40)
            .map(|i| {
                let p = 100.0 + (i as f64 / 4.0).sin() * 5.0 + i as f64 * 0.2;
                Candle::new(i, p, p + 1.0, p - 1.0, p, 1.0)
            })
            .collect();
        let symbol = Symbol::new("ETH");
        let snapshot = compute_indicators(&candles).unwrap();
        assert_eq!(
            score_snapshot(&symbol, snapshot, None),
            score(&symbol, &candles, None)
        );
    }

    #[test]
    fn test_exact_tie_favors_short() {
        // flat series: EMAs equal, RSI 50 gives both sides 0.2, MACD equals signal
        let candles: Vec<Candle> = (0..40)
            .map(|i| Candle::new(i, 100.0, 101.0, 99.0, 100.0, 1.0))
            .collect();
        let result = score(&Symbol::new("BTC"), &candles, None);
        assert_eq!(result.long_score, result.short_score);
        assert_eq!(result.direction(), Direction::Short);
        assert!(result.stop_loss.unwrap() > 100.0);
        assert!(result.take_profit.unwrap() < 100.0);
    }
}
