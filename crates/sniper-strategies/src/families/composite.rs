//! Composite family: scores independent bullish and bearish factors and acts
//! only when enough of them agree.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

const FACTORS: u32 = 4;
const REQUIRED: u32 = 3;

pub(super) fn evaluate(snapshot: &MarketSnapshot, params: &StrategyParams) -> Evaluation {
    let rsi_in_band = snapshot.rsi >= params.rsi_min && snapshot.rsi <= params.rsi_max;
    let volume_confirmed = snapshot.volume_ratio >= params.volume_ratio_min;

    let bull_score = [
        snapshot.trend.is_bullish(),
        rsi_in_band,
        volume_confirmed,
        snapshot.price > snapshot.ema_21,
    ]
    .iter()
    .filter(|&&f| f)
    .count() as u32;

    let bear_score = [
        snapshot.trend.is_bearish(),
        snapshot.rsi > params.rsi_max,
        volume_confirmed,
        snapshot.price < snapshot.ema_21,
    ]
    .iter()
    .filter(|&&f| f)
    .count() as u32;

    if bull_score >= REQUIRED {
        let confidence = (55.0 + (bull_score - REQUIRED) as f64 * 10.0).min(85.0);
        return Evaluation::buy(
            confidence,
            format!("{bull_score} of {FACTORS} bullish factors aligned"),
        );
    }

    if bear_score >= REQUIRED {
        let confidence = (50.0 + (bear_score - REQUIRED) as f64 * 10.0).min(80.0);
        return Evaluation::sell(
            confidence,
            format!("{bear_score} of {FACTORS} bearish factors aligned"),
        );
    }

    let best = bull_score.max(bear_score);
    Evaluation::hold(
        (30.0 + best as f64 * 5.0).min(45.0),
        format!("Only {best} of {FACTORS} factors aligned"),
    )
}
