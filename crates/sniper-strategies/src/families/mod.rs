//! Rule-family evaluators.
//!
//! Each family is a pure function from a snapshot and a parameter set to a
//! verdict. Dispatch is exhaustive over [`StrategyFamily`], so adding a
//! family without wiring its evaluator is a compile error.

use sniper_core::{MarketSnapshot, SignalAction, StrategyFamily, StrategyParams};

mod breakout;
mod channel;
mod composite;
mod crossover;
mod levels;
mod oscillator;
mod reversion;
mod trend;

/// Raw verdict of one family, before the agent attaches identity and price
/// levels.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub action: SignalAction,
    pub confidence: f64,
    pub reasoning: String,
}

impl Evaluation {
    fn new(action: SignalAction, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    fn buy(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(SignalAction::Buy, confidence, reasoning)
    }

    fn sell(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(SignalAction::Sell, confidence, reasoning)
    }

    fn hold(confidence: f64, reasoning: impl Into<String>) -> Self {
        Self::new(SignalAction::Hold, confidence, reasoning)
    }
}

/// Evaluate one family against a snapshot.
pub fn evaluate_family(
    family: StrategyFamily,
    snapshot: &MarketSnapshot,
    params: &StrategyParams,
) -> Evaluation {
    match family {
        StrategyFamily::EmaCrossover => crossover::evaluate(snapshot, params),
        StrategyFamily::VolumeBreakout => breakout::evaluate(snapshot, params),
        StrategyFamily::SupportResistance => levels::evaluate(snapshot, params),
        StrategyFamily::RsiReversal => oscillator::evaluate(snapshot, params),
        StrategyFamily::TrendFollowing => trend::evaluate(snapshot, params),
        StrategyFamily::MeanReversion => reversion::evaluate(snapshot, params),
        StrategyFamily::ChannelBreakout => channel::evaluate(snapshot, params),
        StrategyFamily::Composite => composite::evaluate(snapshot, params),
    }
}
