//! Technical indicators module
//!
//! Streaming EMA, RSI, MACD and ATR plus [`compute_indicators`], which folds
//! a candle series into the last value of each.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use atr::*;
pub use ema::*;
pub use macd::*;
pub use rsi::*;

use crate::data::Candle;
use serde::Serialize;
use thiserror::Error;

pub const EMA_FAST: usize = 12;
pub const EMA_SLOW: usize = 26;
pub const RSI_PERIOD: usize = 14;
pub const MACD_SIGNAL: usize = 9;
pub const ATR_PERIOD: usize = 14;

/// Fewest candles that yield a slow EMA (and so a MACD line)
pub const MIN_CANDLES: usize = EMA_SLOW;

/// Indicator trait for all indicators
pub trait Indicator {
    /// Value fed on each update
    type Input;

    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, input: Self::Input);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}

/// Series too short for the slow EMA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient data: {got} candles, need at least {need}")]
pub struct InsufficientData {
    pub got: usize,
    pub need: usize,
}

/// Last value of every indicator over one candle series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    pub macd: f64,
    /// None until the series is long enough for the signal EMA (34 candles)
    pub macd_signal: Option<f64>,
    pub atr: f64,
}

/// Compute EMA(12), EMA(26), RSI(14), MACD(12,26,9) and ATR(14) over `candles`.
pub fn compute_indicators(candles: &[Candle]) -> Result<IndicatorSnapshot, InsufficientData> {
    let insufficient = InsufficientData {
        got: candles.len(),
        need: MIN_CANDLES,
    };
    let last = match candles.last() {
        Some(last) if candles.len() >= MIN_CANDLES => last,
        _ => return Err(insufficient),
    };

    let mut ema_fast = EMA::new(EMA_FAST);
    let mut ema_slow = EMA::new(EMA_SLOW);
    let mut rsi = RSI::new(RSI_PERIOD);
    let mut macd = MACD::new(EMA_FAST, EMA_SLOW, MACD_SIGNAL);
    let mut atr = ATR::new(ATR_PERIOD);

    for candle in candles {
        ema_fast.update(candle.close);
        ema_slow.update(candle.close);
        rsi.update(candle.close);
        macd.update(candle.close);
        atr.update(*candle);
    }

    // every value below is defined once MIN_CANDLES >= RSI/ATR warm-up
    match (ema_fast.value(), ema_slow.value(), rsi.value(), macd.macd(), atr.value()) {
        (Some(ema_fast), Some(ema_slow), Some(rsi), Some(macd_line), Some(atr)) => {
            Ok(IndicatorSnapshot {
                price: last.close,
                ema_fast,
                ema_slow,
                rsi,
                macd: macd_line,
                macd_signal: macd.signal(),
                atr,
            })
        }
        _ => Err(insufficient),
    }
}
