//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::{Indicator, EMA};

/// MACD line = EMA(fast) - EMA(slow), signal = EMA(signal) of the MACD line
#[derive(Debug, Clone)]
pub struct MACD {
    fast: EMA,
    slow: EMA,
    signal: EMA,
    last_macd: Option<f64>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast: EMA::new(fast_period),
            slow: EMA::new(slow_period),
            signal: EMA::new(signal_period),
            last_macd: None,
        }
    }

    /// Get MACD line value
    pub fn macd(&self) -> Option<f64> {
        self.last_macd
    }

    /// Get signal line value
    pub fn signal(&self) -> Option<f64> {
        self.signal.value()
    }

    /// Get histogram value (MACD - Signal)
    pub fn histogram(&self) -> Option<f64> {
        Some(self.macd()? - self.signal()?)
    }
}

impl Indicator for MACD {
    type Input = f64;

    fn name(&self) -> &str {
        "MACD"
    }

    fn update(&mut self, value: f64) {
        self.fast.update(value);
        self.slow.update(value);

        if let (Some(fast), Some(slow)) = (self.fast.value(), self.slow.value()) {
            let macd = fast - slow;
            self.last_macd = Some(macd);
            self.signal.update(macd);
        }
    }

    fn value(&self) -> Option<f64> {
        self.macd()
    }

    fn is_ready(&self) -> bool {
        // MACD needs slow_period + signal_period - 1 values
        self.signal.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_line_before_signal() {
        let mut macd = MACD::new(12, 26, 9);
        for i in 0..26 {
            macd.update(100.0 + i as f64);
        }
        assert!(macd.macd().is_some());
        assert!(macd.signal().is_none());
        assert!(!macd.is_ready());

        for i in 26..34 {
            macd.update(100.0 + i as f64);
        }
        assert!(macd.is_ready());
        assert!(macd.histogram().is_some());
    }

    #[test]
    fn test_macd_of_linear_trend() {
        // on a straight line both EMAs lag by (period-1)/2 steps
        let mut macd = MACD::new(12, 26, 9);
        for i in 0..60 {
            macd.update(i as f64);
        }
        let line = macd.macd().unwrap();
        assert!((line - 7.0).abs() < 1e-9, "got {line}");
        assert!((macd.signal().unwrap() - 7.0).abs() < 1e-9);
    }
}
