//! Support/resistance family: fades toward levels the market has respected.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

pub(super) fn evaluate(snapshot: &MarketSnapshot, params: &StrategyParams) -> Evaluation {
    let dist_to_support = if snapshot.support > 0.0 {
        (snapshot.price - snapshot.support) / snapshot.support
    } else {
        1.0
    };
    let dist_to_resistance = if snapshot.resistance > 0.0 {
        (snapshot.resistance - snapshot.price) / snapshot.resistance
    } else {
        1.0
    };

    if dist_to_support >= 0.0 && dist_to_support < params.proximity_pct && snapshot.rsi < 45.0 {
        return Evaluation::buy(
            70.0,
            format!(
                "Price {:.2} near support {:.2} with RSI {:.1}",
                snapshot.price, snapshot.support, snapshot.rsi
            ),
        );
    }

    if dist_to_resistance >= 0.0 && dist_to_resistance < params.proximity_pct && snapshot.rsi > 55.0
    {
        return Evaluation::sell(
            65.0,
            format!(
                "Price {:.2} near resistance {:.2} with RSI {:.1}",
                snapshot.price, snapshot.resistance, snapshot.rsi
            ),
        );
    }

    Evaluation::hold(40.0, "Price in the middle of the range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::test_support::bullish_snapshot;
    use sniper_core::SignalAction;

    #[test]
    fn test_bounce_off_support() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 94.5;
        snapshot.support = 94.0;
        snapshot.rsi = 38.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Buy);
        assert!((verdict.confidence - 70.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejection_at_resistance() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 98.5;
        snapshot.resistance = 99.0;
        snapshot.rsi = 62.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Sell);
    }

    #[test]
    fn test_near_support_needs_weak_rsi() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 94.5;
        snapshot.support = 94.0;
        snapshot.rsi = 55.0; // not oversold enough to fade

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Hold);
    }

    #[test]
    fn test_missing_levels_hold() {
        let mut snapshot = bullish_snapshot();
        snapshot.support = 0.0;
        snapshot.resistance = 0.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Hold);
    }
}
