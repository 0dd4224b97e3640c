//! EMA (Exponential Moving Average) indicator

use crate::indicators::Indicator;

/// EMA seeded with the simple average of the first `period` values
#[derive(Debug, Clone)]
pub struct EMA {
    period: usize,
    k: f64,
    update_count: usize,
    seed_sum: f64,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
            update_count: 0,
            seed_sum: 0.0,
            last_value: None,
        }
    }

    /// Get EMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for EMA {
    type Input = f64;

    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.update_count += 1;
        match self.last_value {
            Some(prev) => self.last_value = Some((value - prev) * self.k + prev),
            None => {
                self.seed_sum += value;
                if self.update_count == self.period {
                    self.last_value = Some(self.seed_sum / self.period as f64);
                }
            }
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Calculate EMA from a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut ema = EMA::new(period);
    values
        .iter()
        .map(|&value| {
            ema.update(value);
            ema.value()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_sma() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ema = calculate_ema(&values, 3);
        assert_eq!(ema, vec![None, None, Some(2.0), Some(3.0), Some(4.0), Some(5.0)]);
    }

    #[test]
    fn test_ema_of_constant_series() {
        let mut ema = EMA::new(12);
        for _ in 0..30 {
            ema.update(42.0);
        }
        assert!(ema.is_ready());
        assert_eq!(ema.value(), Some(42.0));
    }
}
