//! Snapshot command: fetch and print market snapshots.

use anyhow::Result;
use std::path::Path;

use crate::cli::SnapshotArgs;

use super::{build_gateway, load_settings};

pub async fn run(args: SnapshotArgs, config_path: Option<&Path>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let gateway = build_gateway(&settings)?;

    for symbol in &args.symbols {
        match gateway.snapshot(symbol, !args.no_cache).await {
            Some(snapshot) => {
                if args.output == "json" {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                } else {
                    println!(
                        "{}: {:.2} ({:+.2}%)  RSI {:.1}  vol {:.1}x  S/R {:.2}/{:.2}  [{}]",
                        snapshot.symbol,
                        snapshot.price,
                        snapshot.change_percent,
                        snapshot.rsi,
                        snapshot.volume_ratio,
                        snapshot.support,
                        snapshot.resistance,
                        snapshot.data_source
                    );
                }
            }
            None => {
                println!("{}: no data available", symbol.to_uppercase());
            }
        }
    }

    Ok(())
}
