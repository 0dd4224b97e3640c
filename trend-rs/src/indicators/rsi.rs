//! RSI (Relative Strength Index) indicator

use crate::indicators::Indicator;

/// Wilder RSI
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    prev: Option<f64>,
    changes: usize,
    avg_gain: f64,
    avg_loss: f64,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
            prev: None,
            changes: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            last_value: None,
        }
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }

    fn compute(&self) -> f64 {
        if self.avg_loss == 0.0 {
            // flat series has no momentum either way
            if self.avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = self.avg_gain / self.avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        }
    }
}

impl Indicator for RSI {
    type Input = f64;

    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let Some(prev) = self.prev.replace(value) else {
            return;
        };

        let change = value - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let period = self.period as f64;
        self.changes += 1;

        if self.changes <= self.period {
            self.avg_gain += gain / period;
            self.avg_loss += loss / period;
            if self.changes < self.period {
                return;
            }
        } else {
            self.avg_gain = (self.avg_gain * (period - 1.0) + gain) / period;
            self.avg_loss = (self.avg_loss * (period - 1.0) + loss) / period;
        }

        self.last_value = Some(self.compute());
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        // needs period+1 values
        self.changes >= self.period
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = RSI::new(period);
    values
        .iter()
        .map(|&value| {
            rsi.update(value);
            rsi.value()
        })
        .collect()
}
