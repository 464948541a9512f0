//! Strategy registry: the ordered set of loaded strategy definitions.
//!
//! Registration order is meaningful: consensus tie-breaks and ranked output
//! fall back to it, so the registry preserves insertion order and never
//! reorders on its own.

use sniper_core::{
    Difficulty, SniperError, SniperResult, StrategyDefinition, StrategyError, StrategyFamily,
};
use tracing::info;

use crate::agent::StrategyAgent;

/// Ordered collection of strategy agents.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    agents: Vec<StrategyAgent>,
}

impl StrategyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in strategy library, one instance of every rule family.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for definition in builtin_definitions() {
            // Built-in definitions are valid by construction.
            registry.agents.push(StrategyAgent::new(definition));
        }
        registry
    }

    /// Load definitions from a JSON array, validating each one. Order in the
    /// document becomes evaluation order. Any invalid definition rejects the
    /// whole document.
    pub fn load_from_json(json: &str) -> SniperResult<Self> {
        let definitions: Vec<StrategyDefinition> = serde_json::from_str(json)
            .map_err(|e| StrategyError::InvalidConfig(format!("bad strategy document: {e}")))?;

        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        info!(count = registry.len(), "strategy registry loaded");
        Ok(registry)
    }

    /// Register one definition at the end of the evaluation order.
    pub fn register(&mut self, definition: StrategyDefinition) -> SniperResult<()> {
        definition.validate()?;
        if self.get(&definition.id).is_some() {
            return Err(SniperError::from(StrategyError::InvalidConfig(format!(
                "duplicate strategy id: {}",
                definition.id
            ))));
        }
        self.agents.push(StrategyAgent::new(definition));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&StrategyAgent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Agents in registration order.
    pub fn agents(&self) -> &[StrategyAgent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Definitions sorted by historical win rate, then total PnL, descending.
    /// Strategies with no recorded trades sink to the bottom in registration
    /// order.
    pub fn rankings(&self) -> Vec<&StrategyDefinition> {
        let mut ranked: Vec<&StrategyDefinition> =
            self.agents.iter().map(|a| a.definition()).collect();
        ranked.sort_by(|a, b| {
            b.performance
                .win_rate()
                .partial_cmp(&a.performance.win_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.performance
                        .total_pnl
                        .partial_cmp(&a.performance.total_pnl)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });
        ranked
    }
}

fn builtin(
    id: &str,
    name: &str,
    family: StrategyFamily,
    category: &str,
    difficulty: Difficulty,
) -> StrategyDefinition {
    let mut def = StrategyDefinition::new(id, name, family);
    def.category = Some(category.to_string());
    def.difficulty = Some(difficulty);
    def
}

fn builtin_definitions() -> Vec<StrategyDefinition> {
    use Difficulty::*;
    use StrategyFamily::*;

    vec![
        builtin("ema_crossover", "EMA Crossover", EmaCrossover, "momentum", Beginner),
        builtin("volume_breakout", "Volume Breakout", VolumeBreakout, "momentum", Beginner),
        builtin(
            "support_resistance",
            "Support/Resistance Bounce",
            SupportResistance,
            "levels",
            Intermediate,
        ),
        builtin("rsi_reversal", "RSI Reversal", RsiReversal, "oscillator", Beginner),
        builtin("trend_following", "Trend Following", TrendFollowing, "trend", Beginner),
        builtin(
            "mean_reversion",
            "Bollinger Mean Reversion",
            MeanReversion,
            "reversion",
            Intermediate,
        ),
        builtin(
            "channel_breakout",
            "Donchian Channel Breakout",
            ChannelBreakout,
            "breakout",
            Intermediate,
        ),
        builtin("composite", "Composite Score", Composite, "composite", Advanced),
    ]
}
