//! Consensus command: evaluate every strategy on live snapshots.

use anyhow::Result;
use sniper_consensus::Orchestrator;
use std::path::Path;

use crate::cli::ConsensusArgs;

use super::{build_gateway, load_registry, load_settings};

pub async fn run(args: ConsensusArgs, config_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let gateway = build_gateway(&settings)?;
    let registry = load_registry(args.strategies.as_deref())?;
    let orchestrator = Orchestrator::new(registry).with_quorum(settings.consensus.quorum);

    for symbol in &args.symbols {
        let Some(snapshot) = gateway.snapshot(symbol, true).await else {
            println!("{}: no data available", symbol.to_uppercase());
            continue;
        };

        let result = orchestrator.evaluate(&snapshot);
        if args.output == "json" {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", result.summary());
            for signal in &result.top_signals {
                println!(
                    "  {} {} ({:.0}%): {}",
                    signal.strategy_id, signal.action, signal.confidence, signal.reasoning
                );
            }
        }
    }

    Ok(())
}
