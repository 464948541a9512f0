//! Volume breakout family: unusual volume pushing price through resistance.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

/// Volume ratio treated as a genuine surge regardless of the configured
/// confirmation threshold.
const SURGE_RATIO: f64 = 2.0;

pub(super) fn evaluate(snapshot: &MarketSnapshot, params: &StrategyParams) -> Evaluation {
    let near_breakout =
        snapshot.resistance > 0.0 && snapshot.price > snapshot.resistance * 0.99;

    if snapshot.volume_ratio >= SURGE_RATIO && near_breakout {
        let confidence = (60.0 + (snapshot.volume_ratio - SURGE_RATIO) * 10.0).min(85.0);
        return Evaluation::buy(
            confidence,
            format!(
                "Volume surge {:.1}x at resistance {:.2}",
                snapshot.volume_ratio, snapshot.resistance
            ),
        );
    }

    if snapshot.volume_ratio >= params.volume_ratio_min
        && snapshot.price > snapshot.ema_9
        && snapshot.rsi > 50.0
    {
        return Evaluation::buy(
            60.0,
            format!(
                "Elevated volume {:.1}x with price above EMA9",
                snapshot.volume_ratio
            ),
        );
    }

    Evaluation::hold(35.0, "No volume confirmation".to_string())
}
