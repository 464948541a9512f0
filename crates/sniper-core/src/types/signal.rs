//! Trading signals emitted by strategy agents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory action for one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalAction::Buy => write!(f, "BUY"),
            SignalAction::Sell => write!(f, "SELL"),
            SignalAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// Output of one strategy agent for one snapshot. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSignal {
    pub action: SignalAction,
    /// Confidence in [0, 100].
    pub confidence: f64,
    pub reasoning: String,
    /// Identifier of the strategy that produced the signal.
    pub strategy_id: String,
    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub target: Option<f64>,
}

impl TradingSignal {
    /// Build a signal with no price levels attached.
    pub fn new(
        action: SignalAction,
        confidence: f64,
        reasoning: impl Into<String>,
        strategy_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            confidence: confidence.clamp(0.0, 100.0),
            reasoning: reasoning.into(),
            strategy_id: strategy_id.into(),
            entry_price: None,
            stop_loss: None,
            target: None,
        }
    }

    /// The safe default: HOLD.
    pub fn hold(confidence: f64, reasoning: impl Into<String>, strategy_id: impl Into<String>) -> Self {
        Self::new(SignalAction::Hold, confidence, reasoning, strategy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let signal = TradingSignal::new(SignalAction::Buy, 120.0, "test", "s1");
        assert_eq!(signal.confidence, 100.0);

        let signal = TradingSignal::new(SignalAction::Sell, -5.0, "test", "s1");
        assert_eq!(signal.confidence, 0.0);
    }

    #[test]
    fn test_action_serializes_uppercase() {
        let json = serde_json::to_string(&SignalAction::Buy).unwrap();
        assert_eq!(json, "\"BUY\"");
    }
}
