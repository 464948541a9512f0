//! Typed settings with working defaults for every field.

use serde::Deserialize;
use sniper_core::{SniperError, SniperResult};
use std::time::Duration;

fn default_cache_ttl_secs() -> u64 {
    10
}
fn default_rate_limit() -> u32 {
    60
}
fn default_rate_period_secs() -> u64 {
    60
}
fn default_quorum() -> f64 {
    1.0 / 3.0
}
fn default_lookback_days() -> u32 {
    365
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Data gateway settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Snapshot cache TTL in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Quote upstream budget: requests per period.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,
    #[serde(default = "default_rate_period_secs")]
    pub rate_period_secs: u64,
}

impl DataSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn rate_period(&self) -> Duration {
        Duration::from_secs(self.rate_period_secs)
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            rate_limit: default_rate_limit(),
            rate_period_secs: default_rate_period_secs(),
        }
    }
}

/// Upstream credentials and locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    /// Finnhub API key; without it the gateway starts history-only.
    #[serde(default)]
    pub finnhub_api_key: Option<String>,
    /// Directory of per-symbol CSV files for offline history.
    #[serde(default)]
    pub csv_dir: Option<String>,
}

/// Consensus settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsensusSettings {
    /// Fraction of agents a side needs to win the vote.
    #[serde(default = "default_quorum")]
    pub quorum: f64,
}

impl Default for ConsensusSettings {
    fn default() -> Self {
        Self {
            quorum: default_quorum(),
        }
    }
}

/// Backtest settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestSettings {
    /// How many days of daily bars to replay.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "sniper_data=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Root settings document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub providers: ProviderSettings,
    #[serde(default)]
    pub consensus: ConsensusSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Validate cross-field constraints once at load time.
    pub fn validate(&self) -> SniperResult<()> {
        if self.data.rate_limit == 0 {
            return Err(SniperError::Config("data.rate_limit must be positive".into()));
        }
        if self.data.rate_period_secs == 0 {
            return Err(SniperError::Config(
                "data.rate_period_secs must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.consensus.quorum) || self.consensus.quorum == 0.0 {
            return Err(SniperError::Config(
                "consensus.quorum must be a fraction in (0, 1]".into(),
            ));
        }
        if self.backtest.lookback_days == 0 {
            return Err(SniperError::Config(
                "backtest.lookback_days must be positive".into(),
            ));
        }
        Ok(())
    }
}
