//! Volatility indicators.

use serde::{Deserialize, Serialize};
use sniper_core::Bar;

use crate::moving_average::Sma;

/// One Bollinger Bands reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands: SMA middle band with a +/- k population-standard-deviation
/// envelope.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Calculate the band series, aligned with the input closes.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<BollingerPoint>> {
        let mut result = vec![None; closes.len()];
        if closes.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;
        for (i, window) in closes.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
            let band = self.std_dev_multiplier * variance.sqrt();

            result[i + self.period - 1] = Some(BollingerPoint {
                upper: mean + band,
                middle: mean,
                lower: mean - band,
            });
        }

        result
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

/// Average True Range: a simple rolling mean of the true range, where the
/// true range is max(high-low, |high-prev_close|, |low-prev_close|).
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate the ATR series, aligned with the input bars.
    pub fn calculate(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let true_ranges: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let prev_close = if i > 0 { Some(bars[i - 1].close) } else { None };
                bar.true_range(prev_close)
            })
            .collect();

        Sma::new(self.period).calculate(&true_ranges)
    }

    pub fn period(&self) -> usize {
        self.period
    }
}
