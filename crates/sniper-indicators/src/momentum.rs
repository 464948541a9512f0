//! Momentum indicators.

/// Relative Strength Index (RSI).
///
/// Uses simple rolling means of gains and losses over the window (not
/// Wilder's smoothing): RS = avg_gain / avg_loss with the loss floored to a
/// tiny epsilon, RSI = 100 - 100/(1+RS). Output is aligned with the input;
/// bars without a full window get `None` and callers substitute the neutral
/// 50.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

/// Floor for the average loss to avoid division by zero.
const LOSS_EPSILON: f64 = 1e-10;

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate the RSI series, aligned with the input closes.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; closes.len()];
        if closes.len() <= self.period {
            return result;
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);
        for window in closes.windows(2) {
            let delta = window[1] - window[0];
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        let period_f64 = self.period as f64;
        // Delta i belongs to bar i+1, so the first full window ends at bar
        // `period`.
        for i in self.period..closes.len() {
            let start = i - self.period;
            let avg_gain: f64 = gains[start..i].iter().sum::<f64>() / period_f64;
            let avg_loss: f64 = losses[start..i].iter().sum::<f64>() / period_f64;
            let rs = avg_gain / avg_loss.max(LOSS_EPSILON);
            result[i] = Some(100.0 - 100.0 / (1.0 + rs));
        }

        result
    }

    /// Most recent RSI, defaulting to the neutral 50 when underived.
    pub fn latest_or_neutral(&self, closes: &[f64]) -> f64 {
        self.calculate(closes)
            .last()
            .copied()
            .flatten()
            .unwrap_or(50.0)
    }

    pub fn period(&self) -> usize {
        self.period
    }
}
