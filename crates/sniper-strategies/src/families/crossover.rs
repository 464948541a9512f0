//! EMA crossover family: short EMA above medium EMA with price confirmation.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

pub(super) fn evaluate(snapshot: &MarketSnapshot, params: &StrategyParams) -> Evaluation {
    let bull_aligned = snapshot.ema_9 > snapshot.ema_21 && snapshot.price > snapshot.ema_9;
    let bear_aligned = snapshot.ema_9 < snapshot.ema_21 && snapshot.price < snapshot.ema_9;
    let rsi_in_band = snapshot.rsi >= params.rsi_min && snapshot.rsi <= params.rsi_max;

    if bull_aligned {
        if rsi_in_band && snapshot.volume_ratio >= params.volume_ratio_min {
            let confidence = (50.0
                + (snapshot.rsi - params.rsi_min)
                + (snapshot.volume_ratio - 1.0) * 10.0)
                .min(90.0);
            return Evaluation::buy(
                confidence,
                format!(
                    "EMA9 above EMA21 with price confirmation, RSI {:.1}, volume {:.1}x",
                    snapshot.rsi, snapshot.volume_ratio
                ),
            );
        }
        if rsi_in_band {
            return Evaluation::buy(
                65.0,
                "EMA alignment bullish but volume unconfirmed".to_string(),
            );
        }
        return Evaluation::hold(
            40.0,
            format!("Bullish EMA alignment but RSI {:.1} outside entry band", snapshot.rsi),
        );
    }

    if bear_aligned {
        return Evaluation::sell(
            60.0,
            "EMA9 below EMA21 with price below both".to_string(),
        );
    }

    Evaluation::hold(30.0, "No EMA alignment".to_string())
}
