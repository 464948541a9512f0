//! Backtest result types.

use serde::{Deserialize, Serialize};
use sniper_core::SignalAction;

/// One recorded decision from the replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledDecision {
    /// Bar index within the replayed series.
    pub index: usize,
    /// Unix timestamp in milliseconds of the bar.
    pub timestamp: i64,
    pub price: f64,
    pub action: SignalAction,
    pub confidence: f64,
    pub reasoning: String,
}

/// Outcome of replaying one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub symbol: String,
    /// Strategy id for a single-strategy run, None for a consensus run.
    pub strategy_id: Option<String>,
    /// Bars actually evaluated, after the indicator warmup.
    pub total_periods: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub hold_signals: usize,
    /// A handful of the actionable decisions, in replay order.
    pub sample_decisions: Vec<SampledDecision>,
    /// Set when the series was too short to evaluate at all.
    pub error: Option<String>,
}

impl BacktestResult {
    pub(crate) fn insufficient(symbol: &str, strategy_id: Option<&str>, have: usize, need: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            strategy_id: strategy_id.map(str::to_string),
            total_periods: 0,
            buy_signals: 0,
            sell_signals: 0,
            hold_signals: 0,
            sample_decisions: Vec::new(),
            error: Some(format!("insufficient history: {have} bars, need more than {need}")),
        }
    }

    /// Fraction of evaluated bars that produced an actionable signal.
    pub fn activity_rate(&self) -> f64 {
        if self.total_periods == 0 {
            return 0.0;
        }
        (self.buy_signals + self.sell_signals) as f64 / self.total_periods as f64
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        if let Some(error) = &self.error {
            return format!("{}: {}", self.symbol, error);
        }
        let scope = self.strategy_id.as_deref().unwrap_or("consensus");
        format!(
            "{} [{}]: {} periods, {} buy / {} sell / {} hold ({:.1}% active)",
            self.symbol,
            scope,
            self.total_periods,
            self.buy_signals,
            self.sell_signals,
            self.hold_signals,
            self.activity_rate() * 100.0
        )
    }
}
