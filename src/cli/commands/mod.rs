//! Command implementations and shared wiring.

pub mod backtest;
pub mod consensus;
pub mod snapshot;
pub mod strategies;
pub mod validate;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sniper_config::Settings;
use sniper_core::{DataError, HistoryProvider, Quote, QuoteProvider};
use sniper_data::{
    CsvHistoryProvider, FinnhubQuoteProvider, GatewayConfig, MarketDataGateway,
    YahooHistoryProvider,
};
use sniper_strategies::StrategyRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Placeholder quote upstream for history-only deployments (no API key).
struct NoQuoteProvider;

#[async_trait]
impl QuoteProvider for NoQuoteProvider {
    async fn quote(&self, _symbol: &str) -> Result<Option<Quote>, DataError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Load settings from the optional config file plus environment.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    sniper_config::load_settings(config_path).context("Failed to load configuration")
}

/// Wire the gateway from settings: Finnhub quotes when a key is configured,
/// CSV history when a directory is configured, Yahoo otherwise.
pub fn build_gateway(settings: &Settings) -> Result<MarketDataGateway> {
    let quote_provider: Arc<dyn QuoteProvider> = match &settings.providers.finnhub_api_key {
        Some(key) => Arc::new(
            FinnhubQuoteProvider::new(key.clone()).context("Failed to build quote client")?,
        ),
        None => {
            info!("no quote API key configured, running history-only");
            Arc::new(NoQuoteProvider)
        }
    };

    let history_provider: Arc<dyn HistoryProvider> = match &settings.providers.csv_dir {
        Some(dir) => Arc::new(CsvHistoryProvider::new(dir)),
        None => Arc::new(YahooHistoryProvider::new().context("Failed to build history client")?),
    };

    Ok(MarketDataGateway::with_config(
        quote_provider,
        history_provider,
        GatewayConfig {
            cache_ttl: settings.data.cache_ttl(),
            rate_limit: settings.data.rate_limit,
            rate_period: settings.data.rate_period(),
        },
    ))
}

/// Load the strategy registry from a JSON file, or fall back to the
/// built-in library.
pub fn load_registry(path: Option<&Path>) -> Result<StrategyRegistry> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            StrategyRegistry::load_from_json(&json).context("Failed to load strategies")
        }
        None => Ok(StrategyRegistry::builtin()),
    }
}
