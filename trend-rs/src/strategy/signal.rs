//! Trend results

use crate::data::Symbol;
use crate::indicators::IndicatorSnapshot;
use crate::sentiment::SentimentReading;
use serde::Serialize;
use std::fmt;

/// Suggested direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Long,
    Short,
    /// Not enough history to form a view
    Hold,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
            Direction::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scored view of one symbol, computed fresh per request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub symbol: Symbol,
    pub long_score: f64,
    pub short_score: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub atr: f64,
    /// None when the series was too short
    pub indicators: Option<IndicatorSnapshot>,
    pub sentiment: Option<SentimentReading>,
}

impl TrendResult {
    /// All-zero result for a series too short to score
    pub fn neutral(symbol: Symbol) -> Self {
        Self {
            symbol,
            long_score: 0.0,
            short_score: 0.0,
            stop_loss: None,
            take_profit: None,
            atr: 0.0,
            indicators: None,
            sentiment: None,
        }
    }

    /// Long when the long score is strictly greater; exact ties go short.
    pub fn direction(&self) -> Direction {
        if self.indicators.is_none() {
            Direction::Hold
        } else if self.long_score > self.short_score {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    /// Score of the stronger side
    pub fn best_score(&self) -> f64 {
        self.long_score.max(self.short_score)
    }

    /// Last close, when indicators were computed
    pub fn price(&self) -> Option<f64> {
        self.indicators.map(|s| s.price)
    }
}
