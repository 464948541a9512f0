//! Mean-reversion family: fades closes outside the Bollinger envelope.

use sniper_core::{MarketSnapshot, StrategyParams};

use super::Evaluation;

pub(super) fn evaluate(snapshot: &MarketSnapshot, _params: &StrategyParams) -> Evaluation {
    let bands_available = snapshot.bb_lower > 0.0 && snapshot.bb_upper > snapshot.bb_lower;

    if bands_available {
        if snapshot.price < snapshot.bb_lower && snapshot.rsi < 35.0 {
            let penetration = (snapshot.bb_lower - snapshot.price) / snapshot.bb_lower * 100.0;
            let confidence = (60.0 + penetration * 5.0).min(80.0);
            return Evaluation::buy(
                confidence,
                format!(
                    "Close {:.2} below lower band {:.2} with RSI {:.1}",
                    snapshot.price, snapshot.bb_lower, snapshot.rsi
                ),
            );
        }

        if snapshot.price > snapshot.bb_upper && snapshot.rsi > 65.0 {
            let excess = (snapshot.price - snapshot.bb_upper) / snapshot.bb_upper * 100.0;
            let confidence = (55.0 + excess * 5.0).min(75.0);
            return Evaluation::sell(
                confidence,
                format!(
                    "Close {:.2} above upper band {:.2} with RSI {:.1}",
                    snapshot.price, snapshot.bb_upper, snapshot.rsi
                ),
            );
        }

        return Evaluation::hold(40.0, "Price inside the envelope".to_string());
    }

    // No bands on short history: fall back to the RSI extreme alone.
    if snapshot.rsi < 35.0 {
        return Evaluation::buy(65.0, format!("RSI {:.1} stretched low", snapshot.rsi));
    }
    if snapshot.rsi > 65.0 {
        return Evaluation::sell(60.0, format!("RSI {:.1} stretched high", snapshot.rsi));
    }

    Evaluation::hold(40.0, "No reversion setup".to_string())
}
