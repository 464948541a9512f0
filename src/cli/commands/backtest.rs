//! Backtest command: replay strategies over historical daily bars.

use anyhow::Result;
use futures::future::join_all;
use sniper_backtest::{BacktestEngine, BacktestResult};
use sniper_consensus::Orchestrator;
use sniper_data::MarketDataGateway;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::BacktestArgs;

use super::{build_gateway, load_registry, load_settings};

pub async fn run(args: BacktestArgs, config_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let gateway = Arc::new(build_gateway(&settings)?);
    let registry = load_registry(args.strategies.as_deref())?;
    let orchestrator = Orchestrator::new(registry).with_quorum(settings.consensus.quorum);
    let engine = Arc::new(BacktestEngine::new(orchestrator));
    let lookback_days = args.days.unwrap_or(settings.backtest.lookback_days);

    info!(
        symbols = args.symbols.len(),
        lookback_days,
        strategy = args.strategy.as_deref().unwrap_or("consensus"),
        "starting replay"
    );

    let runs = args.symbols.iter().map(|symbol| {
        let gateway = gateway.clone();
        let engine = engine.clone();
        let strategy = args.strategy.clone();
        async move { replay_symbol(&gateway, &engine, symbol, strategy.as_deref(), lookback_days).await }
    });
    let results: Vec<BacktestResult> = join_all(runs)
        .await
        .into_iter()
        .collect::<Result<_>>()?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}", result.summary());
            for decision in &result.sample_decisions {
                println!(
                    "  #{} {} @ {:.2} ({:.0}%): {}",
                    decision.index,
                    decision.action,
                    decision.price,
                    decision.confidence,
                    decision.reasoning
                );
            }
        }
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, serde_json::to_string_pretty(&results)?)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

async fn replay_symbol(
    gateway: &MarketDataGateway,
    engine: &BacktestEngine,
    symbol: &str,
    strategy: Option<&str>,
    lookback_days: u32,
) -> Result<BacktestResult> {
    let series = match gateway.daily_history(symbol, lookback_days).await {
        Ok(Some(series)) => series,
        Ok(None) => {
            return Ok(BacktestResult {
                symbol: symbol.to_uppercase(),
                strategy_id: strategy.map(str::to_string),
                total_periods: 0,
                buy_signals: 0,
                sell_signals: 0,
                hold_signals: 0,
                sample_decisions: Vec::new(),
                error: Some("no history available".to_string()),
            })
        }
        Err(error) => {
            warn!(symbol, %error, "history fetch failed");
            return Ok(BacktestResult {
                symbol: symbol.to_uppercase(),
                strategy_id: strategy.map(str::to_string),
                total_periods: 0,
                buy_signals: 0,
                sell_signals: 0,
                hold_signals: 0,
                sample_decisions: Vec::new(),
                error: Some(error.to_string()),
            });
        }
    };

    match strategy {
        Some(id) => Ok(engine.run_single(id, &series)?),
        None => Ok(engine.run(&series)),
    }
}
