//! Strategy definitions: the loadable, typed description of one rule family
//! instance plus its tunable parameters and historical performance counters.

use crate::error::StrategyError;
use serde::{Deserialize, Serialize};

/// Rule family a strategy belongs to. Dispatch is exhaustive over this enum
/// rather than inferred from the strategy's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyFamily {
    EmaCrossover,
    VolumeBreakout,
    SupportResistance,
    RsiReversal,
    TrendFollowing,
    MeanReversion,
    ChannelBreakout,
    Composite,
}

/// Difficulty tier, carried through from the strategy library for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

fn default_rsi_min() -> f64 {
    40.0
}
fn default_rsi_max() -> f64 {
    70.0
}
fn default_volume_ratio_min() -> f64 {
    1.5
}
fn default_proximity_pct() -> f64 {
    0.02
}
fn default_level_margin_pct() -> f64 {
    0.02
}

/// Tunable parameters shared across rule families. Optional in the stored
/// form; every field has a working default and the whole set is validated at
/// load time, not at evaluation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Lower bound of the acceptable RSI band for entries.
    #[serde(default = "default_rsi_min")]
    pub rsi_min: f64,
    /// Upper bound of the acceptable RSI band for entries.
    #[serde(default = "default_rsi_max")]
    pub rsi_max: f64,
    /// Minimum volume ratio for volume-confirmed entries.
    #[serde(default = "default_volume_ratio_min")]
    pub volume_ratio_min: f64,
    /// Distance to support/resistance, as a fraction of the level, that counts
    /// as "near". Empirical constant; kept configurable.
    #[serde(default = "default_proximity_pct")]
    pub proximity_pct: f64,
    /// Margin applied below support for stops and above resistance for
    /// targets.
    #[serde(default = "default_level_margin_pct")]
    pub level_margin_pct: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            rsi_min: default_rsi_min(),
            rsi_max: default_rsi_max(),
            volume_ratio_min: default_volume_ratio_min(),
            proximity_pct: default_proximity_pct(),
            level_margin_pct: default_level_margin_pct(),
        }
    }
}

impl StrategyParams {
    /// Validate the parameter set.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if !(0.0..=100.0).contains(&self.rsi_min) || !(0.0..=100.0).contains(&self.rsi_max) {
            return Err(StrategyError::InvalidConfig(
                "RSI bounds must be between 0 and 100".into(),
            ));
        }
        if self.rsi_min >= self.rsi_max {
            return Err(StrategyError::InvalidConfig(
                "rsi_min must be less than rsi_max".into(),
            ));
        }
        if self.volume_ratio_min <= 0.0 {
            return Err(StrategyError::InvalidConfig(
                "volume_ratio_min must be positive".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.proximity_pct) {
            return Err(StrategyError::InvalidConfig(
                "proximity_pct must be a fraction in [0, 1)".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.level_margin_pct) {
            return Err(StrategyError::InvalidConfig(
                "level_margin_pct must be a fraction in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Historical performance counters. Read-only during evaluation; updated by
/// the external trade-journal subsystem after trades close.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub total_trades: u32,
    #[serde(default)]
    pub total_pnl: f64,
}

impl PerformanceRecord {
    /// Win rate as a percentage, 0 when no trades are recorded.
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_trades as f64 * 100.0
        }
    }
}

/// One registered strategy: a family tag plus its parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyDefinition {
    /// Unique identifier, e.g. "ema_crossover_pullback".
    pub id: String,
    /// Display name.
    pub name: String,
    pub family: StrategyFamily,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub params: StrategyParams,
    #[serde(default)]
    pub performance: PerformanceRecord,
}

impl StrategyDefinition {
    /// Create a definition with default parameters.
    pub fn new(id: impl Into<String>, name: impl Into<String>, family: StrategyFamily) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            family,
            category: None,
            difficulty: None,
            params: StrategyParams::default(),
            performance: PerformanceRecord::default(),
        }
    }

    /// Validate the definition at load time.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.id.is_empty() {
            return Err(StrategyError::InvalidConfig(
                "strategy id must not be empty".into(),
            ));
        }
        self.params.validate()
    }
}
