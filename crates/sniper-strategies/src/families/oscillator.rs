//! RSI reversal family: classic oversold/overbought extremes.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

pub(super) fn evaluate(snapshot: &MarketSnapshot, _params: &StrategyParams) -> Evaluation {
    if snapshot.rsi < OVERSOLD {
        // Deeper oversold, more conviction
        let confidence = (65.0 + (OVERSOLD - snapshot.rsi)).min(80.0);
        return Evaluation::buy(
            confidence,
            format!("RSI {:.1} oversold", snapshot.rsi),
        );
    }

    if snapshot.rsi > OVERBOUGHT {
        let confidence = (65.0 + (snapshot.rsi - OVERBOUGHT)).min(80.0);
        return Evaluation::sell(
            confidence,
            format!("RSI {:.1} overbought", snapshot.rsi),
        );
    }

    Evaluation::hold(40.0, format!("RSI {:.1} in neutral territory", snapshot.rsi))
}
