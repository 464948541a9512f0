//! Replay engine.
//!
//! Snapshots are built once for the whole series; because every snapshot at
//! index `i` depends only on bars `0..=i`, replaying them in order is
//! equivalent to re-running the live path bar by bar.

use sniper_core::{BarSeries, SignalAction, SniperResult, StrategyError};
use sniper_consensus::Orchestrator;
use sniper_indicators::SnapshotBuilder;
use tracing::info;

use crate::report::{BacktestResult, SampledDecision};

/// Bars skipped before consensus replay; enough for the 21-period EMA to
/// settle.
pub const CONSENSUS_WARMUP: usize = 21;

/// Bars skipped before single-strategy replay; covers the 40-bar channel.
pub const SINGLE_WARMUP: usize = 41;

const CONSENSUS_SAMPLES: usize = 5;
const SINGLE_SAMPLES: usize = 3;

/// Replays bar series through the strategy layer.
pub struct BacktestEngine {
    orchestrator: Orchestrator,
}

impl BacktestEngine {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Replay the full consensus over the series.
    pub fn run(&self, series: &BarSeries) -> BacktestResult {
        if series.len() <= CONSENSUS_WARMUP {
            return BacktestResult::insufficient(&series.symbol, None, series.len(), CONSENSUS_WARMUP);
        }

        let snapshots = SnapshotBuilder::new("backtest").build_all(series);
        let mut result = BacktestResult {
            symbol: series.symbol.to_uppercase(),
            strategy_id: None,
            total_periods: snapshots.len() - CONSENSUS_WARMUP,
            buy_signals: 0,
            sell_signals: 0,
            hold_signals: 0,
            sample_decisions: Vec::new(),
            error: None,
        };

        for (index, snapshot) in snapshots.iter().enumerate().skip(CONSENSUS_WARMUP) {
            let consensus = self.orchestrator.evaluate(snapshot);
            tally(
                &mut result,
                index,
                snapshot.timestamp,
                snapshot.price,
                consensus.action,
                consensus.confidence,
                format!(
                    "{}/{}/{} buy/sell/hold",
                    consensus.buy_count, consensus.sell_count, consensus.hold_count
                ),
                CONSENSUS_SAMPLES,
            );
        }

        info!(symbol = %result.symbol, periods = result.total_periods, "consensus replay finished");
        result
    }

    /// Replay a single registered strategy over the series.
    pub fn run_single(&self, strategy_id: &str, series: &BarSeries) -> SniperResult<BacktestResult> {
        let agent = self
            .orchestrator
            .registry()
            .get(strategy_id)
            .ok_or_else(|| StrategyError::NotFound(strategy_id.to_string()))?;

        if series.len() <= SINGLE_WARMUP {
            return Ok(BacktestResult::insufficient(
                &series.symbol,
                Some(strategy_id),
                series.len(),
                SINGLE_WARMUP,
            ));
        }

        let snapshots = SnapshotBuilder::new("backtest").build_all(series);
        let mut result = BacktestResult {
            symbol: series.symbol.to_uppercase(),
            strategy_id: Some(strategy_id.to_string()),
            total_periods: snapshots.len() - SINGLE_WARMUP,
            buy_signals: 0,
            sell_signals: 0,
            hold_signals: 0,
            sample_decisions: Vec::new(),
            error: None,
        };

        for (index, snapshot) in snapshots.iter().enumerate().skip(SINGLE_WARMUP) {
            let signal = agent.evaluate(snapshot);
            tally(
                &mut result,
                index,
                snapshot.timestamp,
                snapshot.price,
                signal.action,
                signal.confidence,
                signal.reasoning,
                SINGLE_SAMPLES,
            );
        }

        info!(
            symbol = %result.symbol,
            strategy = strategy_id,
            periods = result.total_periods,
            "single-strategy replay finished"
        );
        Ok(result)
    }
}

#[allow(clippy::too_many_arguments)]
fn tally(
    result: &mut BacktestResult,
    index: usize,
    timestamp: i64,
    price: f64,
    action: SignalAction,
    confidence: f64,
    reasoning: String,
    max_samples: usize,
) {
    match action {
        SignalAction::Buy => result.buy_signals += 1,
        SignalAction::Sell => result.sell_signals += 1,
        SignalAction::Hold => result.hold_signals += 1,
    }

    if action != SignalAction::Hold && result.sample_decisions.len() < max_samples {
        result.sample_decisions.push(SampledDecision {
            index,
            timestamp,
            price,
            action,
            confidence,
            reasoning,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_core::Bar;
    use sniper_strategies::StrategyRegistry;

    fn series(prices: &[f64]) -> BarSeries {
        let bars: Vec<Bar> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                Bar::new(i as i64 * 86_400_000, p, p * 1.01, p * 0.99, p, 1_000_000.0)
            })
            .collect();
        BarSeries::from_bars("test".to_string(), bars)
    }

    fn trending_prices(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.7).sin() * 2.0)
            .collect()
    }

    fn engine() -> BacktestEngine {
        BacktestEngine::new(Orchestrator::new(StrategyRegistry::builtin()))
    }

    #[test]
    fn test_counts_sum_to_periods() {
        let result = engine().run(&series(&trending_prices(80)));

        assert!(result.error.is_none());
        assert_eq!(result.total_periods, 80 - CONSENSUS_WARMUP);
        assert_eq!(
            result.buy_signals + result.sell_signals + result.hold_signals,
            result.total_periods
        );
    }

    #[test]
    fn test_symbol_upper_cased_in_result() {
        let result = engine().run(&series(&trending_prices(40)));
        assert_eq!(result.symbol, "TEST");
    }

    #[test]
    fn test_short_series_yields_error_marker() {
        let result = engine().run(&series(&trending_prices(CONSENSUS_WARMUP)));

        assert!(result.error.is_some());
        assert_eq!(result.total_periods, 0);
        assert_eq!(result.buy_signals + result.sell_signals + result.hold_signals, 0);
    }

    #[test]
    fn test_samples_capped_and_actionable() {
        let result = engine().run(&series(&trending_prices(200)));

        assert!(result.sample_decisions.len() <= 5);
        for decision in &result.sample_decisions {
            assert_ne!(decision.action, SignalAction::Hold);
            assert!(decision.index >= CONSENSUS_WARMUP);
        }
    }

    #[test]
    fn test_single_strategy_replay() {
        let result = engine()
            .run_single("trend_following", &series(&trending_prices(100)))
            .unwrap();

        assert_eq!(result.strategy_id.as_deref(), Some("trend_following"));
        assert_eq!(result.total_periods, 100 - SINGLE_WARMUP);
        assert_eq!(
            result.buy_signals + result.sell_signals + result.hold_signals,
            result.total_periods
        );
        assert!(result.sample_decisions.len() <= 3);
    }

    #[test]
    fn test_single_strategy_longer_warmup() {
        // Enough bars for consensus but not for a single-strategy run
        let prices = trending_prices(30);
        let engine = engine();

        assert!(engine.run(&series(&prices)).error.is_none());
        let single = engine.run_single("trend_following", &series(&prices)).unwrap();
        assert!(single.error.is_some());
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let err = engine().run_single("does_not_exist", &series(&trending_prices(100)));
        assert!(err.is_err());
    }

    #[test]
    fn test_uptrend_produces_buys() {
        let result = engine().run(&series(&trending_prices(150)));
        assert!(result.buy_signals > 0);
    }
}
