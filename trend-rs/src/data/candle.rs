//! OHLCV candle data structures

use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time, epoch milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume (0 when the source does not report it)
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Widen high/low so they bracket open and close, and clamp volume at zero.
    pub fn repaired(mut self) -> Self {
        self.high = self.high.max(self.open).max(self.close);
        self.low = self.low.min(self.open).min(self.close);
        if !(self.volume >= 0.0) {
            self.volume = 0.0;
        }
        self
    }

    /// True when every price is finite
    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }

    /// True range against the previous close (plain high-low range for the first candle)
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        let range = self.high - self.low;
        match prev_close {
            Some(prev) => range
                .max((self.high - prev).abs())
                .max((self.low - prev).abs()),
            None => range,
        }
    }
}

/// Sort ascending by timestamp, drop duplicate timestamps (first seen wins),
/// repair each candle and keep only the last `limit` entries.
pub fn normalize_series(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    candles.retain(Candle::is_finite);
    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);

    let skip = candles.len().saturating_sub(limit);
    candles.into_iter().skip(skip).map(Candle::repaired).collect()
}
