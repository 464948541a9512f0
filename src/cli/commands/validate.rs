//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use super::load_settings;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating configuration: defaults + environment"),
    }

    let settings = load_settings(config_path)?;

    println!("Configuration is valid!");
    println!();
    println!("Cache TTL: {}s", settings.data.cache_ttl_secs);
    println!(
        "Quote budget: {} requests per {}s",
        settings.data.rate_limit, settings.data.rate_period_secs
    );
    println!("Consensus quorum: {:.2}", settings.consensus.quorum);
    println!("Backtest lookback: {} days", settings.backtest.lookback_days);
    println!(
        "Quote upstream: {}",
        if settings.providers.finnhub_api_key.is_some() {
            "finnhub"
        } else {
            "none (history only)"
        }
    );
    println!(
        "History upstream: {}",
        settings.providers.csv_dir.as_deref().unwrap_or("yahoo")
    );
    println!("Log level: {}", settings.logging.level);

    Ok(())
}
