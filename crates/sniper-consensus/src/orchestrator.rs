//! Vote aggregation across strategy agents.

use serde::{Deserialize, Serialize};
use sniper_core::{MarketSnapshot, SignalAction, TradingSignal};
use sniper_strategies::StrategyRegistry;
use tracing::debug;

/// Fraction of all agents that must vote a side before it can win.
pub const DEFAULT_QUORUM: f64 = 1.0 / 3.0;

/// How many of the strongest signals are surfaced alongside the verdict.
const TOP_SIGNALS: usize = 3;

/// Aggregated verdict of one evaluation round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub symbol: String,
    pub action: SignalAction,
    /// Mean confidence of the winning side, or the neutral 50 on HOLD.
    pub confidence: f64,
    pub buy_count: usize,
    pub sell_count: usize,
    pub hold_count: usize,
    pub total_agents: usize,
    /// Strongest signals voting the winning action, highest confidence
    /// first. Ties keep registration order.
    pub top_signals: Vec<TradingSignal>,
    pub price: f64,
    pub timestamp: i64,
}

impl ConsensusResult {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({:.0}% confidence, {}/{}/{} buy/sell/hold of {})",
            self.symbol,
            self.action,
            self.confidence,
            self.buy_count,
            self.sell_count,
            self.hold_count,
            self.total_agents
        )
    }
}

/// Runs the registry against snapshots and forms the consensus.
pub struct Orchestrator {
    registry: StrategyRegistry,
    quorum: f64,
}

impl Orchestrator {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            quorum: DEFAULT_QUORUM,
        }
    }

    /// Override the winning-side quorum fraction.
    pub fn with_quorum(mut self, quorum: f64) -> Self {
        self.quorum = quorum.clamp(0.0, 1.0);
        self
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Evaluate every agent against the snapshot and aggregate the votes.
    ///
    /// A side wins when it outvotes the other side and reaches the quorum
    /// fraction of all agents. Anything else, including an empty registry or
    /// a snapshot without a usable price, is a neutral HOLD.
    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> ConsensusResult {
        if !snapshot.is_evaluable() {
            debug!(symbol = %snapshot.symbol, "no usable price, holding without a vote");
            return ConsensusResult {
                symbol: snapshot.symbol.clone(),
                action: SignalAction::Hold,
                confidence: 50.0,
                buy_count: 0,
                sell_count: 0,
                hold_count: 0,
                total_agents: 0,
                top_signals: Vec::new(),
                price: snapshot.price,
                timestamp: snapshot.timestamp,
            };
        }

        let signals: Vec<TradingSignal> = self
            .registry
            .agents()
            .iter()
            .map(|agent| agent.evaluate(snapshot))
            .collect();

        let total = signals.len();
        let buy: Vec<&TradingSignal> = signals
            .iter()
            .filter(|s| s.action == SignalAction::Buy)
            .collect();
        let sell: Vec<&TradingSignal> = signals
            .iter()
            .filter(|s| s.action == SignalAction::Sell)
            .collect();
        let buy_count = buy.len();
        let sell_count = sell.len();
        let hold_count = total - buy_count - sell_count;

        let required = self.quorum * total as f64;
        let (action, confidence) = if buy_count > sell_count && buy_count as f64 >= required {
            (SignalAction::Buy, mean_confidence(&buy))
        } else if sell_count > buy_count && sell_count as f64 >= required {
            (SignalAction::Sell, mean_confidence(&sell))
        } else {
            (SignalAction::Hold, 50.0)
        };

        // Only signals voting the winning action contribute to the report.
        let mut ranked: Vec<TradingSignal> = signals
            .iter()
            .filter(|s| s.action == action)
            .cloned()
            .collect();
        // Stable sort keeps registration order between equal confidences.
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(TOP_SIGNALS);

        debug!(
            symbol = %snapshot.symbol,
            %action,
            buy_count,
            sell_count,
            hold_count,
            "consensus formed"
        );

        ConsensusResult {
            symbol: snapshot.symbol.clone(),
            action,
            confidence,
            buy_count,
            sell_count,
            hold_count,
            total_agents: total,
            top_signals: ranked,
            price: snapshot.price,
            timestamp: snapshot.timestamp,
        }
    }
}

fn mean_confidence(signals: &[&TradingSignal]) -> f64 {
    if signals.is_empty() {
        return 50.0;
    }
    signals.iter().map(|s| s.confidence).sum::<f64>() / signals.len() as f64
}
