//! Configuration management.
//!
//! Settings layer from an optional TOML file, then `SNIPER__` environment
//! variables (double-underscore nesting, e.g. `SNIPER__DATA__RATE_LIMIT`).

mod settings;

pub use settings::{
    BacktestSettings, ConsensusSettings, DataSettings, LoggingSettings, ProviderSettings, Settings,
};

use config::{Config, Environment, File};
use sniper_core::{SniperError, SniperResult};
use std::path::Path;

/// Load and validate configuration from an optional file plus environment.
pub fn load_settings(path: Option<&Path>) -> SniperResult<Settings> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    let config = builder
        .add_source(
            Environment::with_prefix("SNIPER")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| SniperError::Config(e.to_string()))?;

    let settings: Settings = config
        .try_deserialize()
        .map_err(|e| SniperError::Config(e.to_string()))?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.data.rate_limit, 60);
        assert_eq!(settings.backtest.lookback_days, 365);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_settings(Some(Path::new("/nonexistent/sniper.toml")));
        assert!(result.is_err());
    }
}
