//! Channel extremes and volume ratio.

use serde::{Deserialize, Serialize};

/// One Donchian channel reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DonchianPoint {
    /// Rolling highest high.
    pub upper: f64,
    /// Rolling lowest low.
    pub lower: f64,
}

/// Donchian channel: rolling highest-high / lowest-low over a fixed window.
///
/// The window degrades to the available history, so early bars report the
/// extremes of everything seen so far.
#[derive(Debug, Clone)]
pub struct DonchianChannel {
    period: usize,
}

impl DonchianChannel {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate the channel series, aligned with the input.
    pub fn calculate(&self, highs: &[f64], lows: &[f64]) -> Vec<DonchianPoint> {
        let len = highs.len().min(lows.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            let start = (i + 1).saturating_sub(self.period);
            let upper = highs[start..=i].iter().cloned().fold(f64::MIN, f64::max);
            let lower = lows[start..=i].iter().cloned().fold(f64::MAX, f64::min);
            result.push(DonchianPoint { upper, lower });
        }

        result
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Volume ratio: each bar's volume over the rolling average volume
/// (20-bar window by convention), with the average floored to 1 to avoid
/// division by zero. The window degrades to the available history.
pub fn volume_ratio_series(volumes: &[f64], period: usize) -> Vec<f64> {
    assert!(period > 0, "Period must be greater than 0");
    let mut result = Vec::with_capacity(volumes.len());

    for i in 0..volumes.len() {
        let start = (i + 1).saturating_sub(period);
        let window = &volumes[start..=i];
        let avg = (window.iter().sum::<f64>() / window.len() as f64).max(1.0);
        result.push(volumes[i] / avg);
    }

    result
}
