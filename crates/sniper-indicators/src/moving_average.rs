//! Moving average indicators.

/// Simple Moving Average over a fixed window.
///
/// Emits one value per input element; elements before the window is full get
/// `None`.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate the SMA series, aligned with the input.
    pub fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Exponential Moving Average.
///
/// Recursive exponential smoothing with alpha = 2/(span+1), seeded with the
/// first input value. The seed choice matters: both the live and historical
/// paths must derive identical values for the same series.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { span, alpha }
    }

    /// Calculate the EMA series, one value per input element.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let mut ema = match data.first() {
            Some(&first) => first,
            None => return result,
        };
        result.push(ema);

        let one_minus_alpha = 1.0 - self.alpha;
        for &value in &data[1..] {
            ema = value * self.alpha + ema * one_minus_alpha;
            result.push(ema);
        }

        result
    }

    /// The most recent EMA value for the series.
    pub fn latest(&self, data: &[f64]) -> Option<f64> {
        self.calculate(data).last().copied()
    }

    pub fn span(&self) -> usize {
        self.span
    }
}
