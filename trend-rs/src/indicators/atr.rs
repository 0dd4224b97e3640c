//! ATR (Average True Range) indicator

use crate::data::Candle;
use crate::indicators::Indicator;

/// Wilder ATR. The first candle only provides the previous close; the first
/// value is the plain average of the next `period` true ranges.
#[derive(Debug, Clone)]
pub struct ATR {
    period: usize,
    prev_close: Option<f64>,
    ranges: usize,
    seed_sum: f64,
    last_value: Option<f64>,
}

impl ATR {
    /// Create new ATR indicator
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            prev_close: None,
            ranges: 0,
            seed_sum: 0.0,
            last_value: None,
        }
    }

    /// Get ATR period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for ATR {
    type Input = Candle;

    fn name(&self) -> &str {
        "ATR"
    }

    fn update(&mut self, candle: Candle) {
        let Some(prev_close) = self.prev_close.replace(candle.close) else {
            return;
        };

        let tr = candle.true_range(Some(prev_close));
        let period = self.period as f64;
        self.ranges += 1;

        self.last_value = match self.last_value {
            Some(prev) => Some((prev * (period - 1.0) + tr) / period),
            None => {
                self.seed_sum += tr;
                (self.ranges == self.period).then(|| self.seed_sum / period)
            }
        };
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.ranges >= self.period
    }
}

/// Calculate ATR over a candle series
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut atr = ATR::new(period);
    candles
        .iter()
        .map(|&candle| {
            atr.update(candle);
            atr.value()
        })
        .collect()
}
