//! Strategy agent: wraps one strategy definition and turns snapshots into
//! fully-formed trading signals.

use sniper_core::{MarketSnapshot, SignalAction, StrategyDefinition, TradingSignal};
use tracing::debug;

use crate::families::evaluate_family;

/// One evaluatable strategy. Cheap to construct; holds only the definition.
#[derive(Debug, Clone)]
pub struct StrategyAgent {
    definition: StrategyDefinition,
}

impl StrategyAgent {
    pub fn new(definition: StrategyDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &StrategyDefinition {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Evaluate the snapshot. Never fails: a snapshot without a usable price
    /// yields a zero-confidence HOLD.
    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> TradingSignal {
        if !snapshot.is_evaluable() {
            return TradingSignal::hold(0.0, "No valid price", &self.definition.id);
        }

        let verdict = evaluate_family(self.definition.family, snapshot, &self.definition.params);
        debug!(
            strategy = %self.definition.id,
            symbol = %snapshot.symbol,
            action = %verdict.action,
            confidence = verdict.confidence,
            "strategy evaluated"
        );

        let mut signal = TradingSignal::new(
            verdict.action,
            verdict.confidence,
            verdict.reasoning,
            &self.definition.id,
        );
        self.attach_levels(&mut signal, snapshot);
        signal
    }

    /// Derive entry, stop and target from the snapshot's support/resistance
    /// levels, falling back to fixed percentages when the levels are missing
    /// or on the wrong side of the price.
    fn attach_levels(&self, signal: &mut TradingSignal, snapshot: &MarketSnapshot) {
        let margin = self.definition.params.level_margin_pct;
        let price = snapshot.price;

        match signal.action {
            SignalAction::Buy => {
                signal.entry_price = Some(price);
                signal.stop_loss = if snapshot.support > 0.0 && snapshot.support < price {
                    Some(snapshot.support * (1.0 - margin))
                } else {
                    Some(price * 0.98)
                };
                signal.target = if snapshot.resistance > price {
                    Some(snapshot.resistance * (1.0 + margin))
                } else {
                    Some(price * 1.03)
                };
            }
            SignalAction::Sell => {
                signal.entry_price = Some(price);
                signal.stop_loss = if snapshot.resistance > price {
                    Some(snapshot.resistance * (1.0 + margin))
                } else {
                    Some(price * 1.02)
                };
                signal.target = if snapshot.support > 0.0 && snapshot.support < price {
                    Some(snapshot.support * (1.0 - margin))
                } else {
                    Some(price * 0.97)
                };
            }
            SignalAction::Hold => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::test_support::bullish_snapshot;
    use sniper_core::{MarketSnapshot, StrategyFamily};

    fn agent(family: StrategyFamily) -> StrategyAgent {
        StrategyAgent::new(StrategyDefinition::new("test_strategy", "Test", family))
    }

    #[test]
    fn test_zero_price_short_circuits_to_hold() {
        let snapshot = MarketSnapshot::degraded("TEST", 0.0);

        for family in [
            StrategyFamily::EmaCrossover,
            StrategyFamily::VolumeBreakout,
            StrategyFamily::Composite,
        ] {
            let signal = agent(family).evaluate(&snapshot);
            assert_eq!(signal.action, SignalAction::Hold);
            assert_eq!(signal.confidence, 0.0);
        }
    }

    #[test]
    fn test_volume_breakout_scenario() {
        let mut snapshot = bullish_snapshot();
        snapshot.volume_ratio = 2.0;
        snapshot.resistance = 99.0;

        let signal = agent(StrategyFamily::VolumeBreakout).evaluate(&snapshot);
        assert_eq!(signal.action, SignalAction::Buy);
        assert!(signal.confidence >= 60.0);
        assert_eq!(signal.strategy_id, "test_strategy");
    }

    #[test]
    fn test_buy_levels_derived_from_support_resistance() {
        let snapshot = bullish_snapshot(); // support 94, resistance 99, price 100
        let signal = agent(StrategyFamily::TrendFollowing).evaluate(&snapshot);

        assert_eq!(signal.action, SignalAction::Buy);
        assert_eq!(signal.entry_price, Some(100.0));
        // Stop 2% under support
        assert!((signal.stop_loss.unwrap() - 94.0 * 0.98).abs() < 1e-10);
        // Resistance below price: percentage target instead
        assert!((signal.target.unwrap() - 103.0).abs() < 1e-10);
    }

    #[test]
    fn test_buy_target_above_resistance_when_available() {
        let mut snapshot = bullish_snapshot();
        snapshot.resistance = 105.0;

        let signal = agent(StrategyFamily::TrendFollowing).evaluate(&snapshot);
        assert!((signal.target.unwrap() - 105.0 * 1.02).abs() < 1e-10);
    }

    #[test]
    fn test_hold_carries_no_levels() {
        let mut snapshot = bullish_snapshot();
        snapshot.rsi = 50.0; // neutral for the reversal family

        let signal = agent(StrategyFamily::RsiReversal).evaluate(&snapshot);
        assert_eq!(signal.action, SignalAction::Hold);
        assert!(signal.entry_price.is_none());
        assert!(signal.stop_loss.is_none());
        assert!(signal.target.is_none());
    }
}
