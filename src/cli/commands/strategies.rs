//! List strategies command.

use anyhow::Result;

use crate::cli::StrategiesArgs;

use super::load_registry;

pub async fn run(args: StrategiesArgs) -> Result<()> {
    let registry = load_registry(args.strategies.as_deref())?;

    println!("Registered Strategies ({})", registry.len());
    println!("═══════════════════════════════════════════════════════════");
    println!();

    let definitions: Vec<_> = if args.ranked {
        registry.rankings()
    } else {
        registry.agents().iter().map(|a| a.definition()).collect()
    };

    for def in definitions {
        println!("  {} ({})", def.name, def.id);
        if let Some(category) = &def.category {
            println!("    category: {category}");
        }
        if def.performance.total_trades > 0 {
            println!(
                "    record: {:.1}% win rate over {} trades, {:+.2} total PnL",
                def.performance.win_rate(),
                def.performance.total_trades,
                def.performance.total_pnl
            );
        }
        println!();
    }

    println!("Use `backtest --strategy <id>` to replay a single strategy.");

    Ok(())
}
