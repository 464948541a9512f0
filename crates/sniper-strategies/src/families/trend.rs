//! Trend-following family: rides the classified trend while price confirms.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

pub(super) fn evaluate(snapshot: &MarketSnapshot, _params: &StrategyParams) -> Evaluation {
    if snapshot.trend.is_bullish() && snapshot.price > snapshot.ema_9 {
        return Evaluation::buy(
            70.0,
            format!("Bullish trend with price above EMA9 {:.2}", snapshot.ema_9),
        );
    }

    if snapshot.trend.is_bearish() && snapshot.price < snapshot.ema_9 {
        return Evaluation::sell(
            65.0,
            format!("Bearish trend with price below EMA9 {:.2}", snapshot.ema_9),
        );
    }

    Evaluation::hold(35.0, "Trend and price disagree".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::test_support::{bearish_snapshot, bullish_snapshot};
    use sniper_core::SignalAction;

    #[test]
    fn test_bullish_trend_buys() {
        let verdict = evaluate(&bullish_snapshot(), &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Buy);
        assert!((verdict.confidence - 70.0).abs() < 1e-10);
    }

    #[test]
    fn test_bearish_trend_sells() {
        let verdict = evaluate(&bearish_snapshot(), &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Sell);
    }

    #[test]
    fn test_conflicting_price_holds() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 97.0; // bullish trend label but price under EMA9

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Hold);
    }
}
