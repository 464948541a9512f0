//! Channel breakout family: closes at the Donchian extremes with volume.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

/// How close to the channel bound (as a fraction of the bound) a close counts
/// as a breakout. The current bar is part of the rolling window, so an exact
/// touch is the strongest possible reading.
const BOUND_TOLERANCE: f64 = 0.005;

pub(super) fn evaluate(snapshot: &MarketSnapshot, params: &StrategyParams) -> Evaluation {
    if snapshot.donchian_upper_20 <= 0.0 {
        return Evaluation::hold(35.0, "No channel history".to_string());
    }

    let at_upper = snapshot.price >= snapshot.donchian_upper_20 * (1.0 - BOUND_TOLERANCE);
    let at_lower = snapshot.price <= snapshot.donchian_lower_20 * (1.0 + BOUND_TOLERANCE);

    if at_upper && snapshot.volume_ratio >= params.volume_ratio_min {
        // A push through the wider 40-bar channel as well is the strong case.
        let beyond_40 = snapshot.donchian_upper_40 > 0.0
            && snapshot.price >= snapshot.donchian_upper_40 * (1.0 - BOUND_TOLERANCE);
        let confidence = if beyond_40 { 80.0 } else { 70.0 };
        return Evaluation::buy(
            confidence,
            format!(
                "Close {:.2} at 20-bar channel top {:.2} on {:.1}x volume",
                snapshot.price, snapshot.donchian_upper_20, snapshot.volume_ratio
            ),
        );
    }

    if at_lower {
        return Evaluation::sell(
            65.0,
            format!(
                "Close {:.2} at 20-bar channel bottom {:.2}",
                snapshot.price, snapshot.donchian_lower_20
            ),
        );
    }

    Evaluation::hold(35.0, "Price inside the channel".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::test_support::bullish_snapshot;
    use sniper_core::SignalAction;

    #[test]
    fn test_breakout_with_volume_buys() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 99.0; // touching the 20-bar top
        snapshot.volume_ratio = 2.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Buy);
        assert!((verdict.confidence - 70.0).abs() < 1e-10);
    }

    #[test]
    fn test_breakout_beyond_40_bar_channel_is_stronger() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 101.5;
        snapshot.donchian_upper_20 = 101.5;
        snapshot.donchian_upper_40 = 101.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Buy);
        assert!((verdict.confidence - 80.0).abs() < 1e-10);
    }

    #[test]
    fn test_breakout_without_volume_holds() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 99.0;
        snapshot.volume_ratio = 1.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Hold);
    }

    #[test]
    fn test_breakdown_sells() {
        let mut snapshot = bullish_snapshot();
        snapshot.price = 94.0; // at the 20-bar bottom

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Sell);
    }

    #[test]
    fn test_no_channel_history_holds() {
        let mut snapshot = bullish_snapshot();
        snapshot.donchian_upper_20 = 0.0;
        snapshot.donchian_lower_20 = 0.0;

        let verdict = evaluate(&snapshot, &StrategyParams::default());
        assert_eq!(verdict.action, SignalAction::Hold);
    }
}
