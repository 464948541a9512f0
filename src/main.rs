//! Market analysis CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    setup_logging(log_level, cli.json_logs);

    match cli.command {
        Commands::Snapshot(args) => cli::commands::snapshot::run(args, cli.config.as_deref()).await,
        Commands::Consensus(args) => {
            cli::commands::consensus::run(args, cli.config.as_deref()).await
        }
        Commands::Backtest(args) => cli::commands::backtest::run(args, cli.config.as_deref()).await,
        Commands::Strategies(args) => cli::commands::strategies::run(args).await,
        Commands::ValidateConfig => cli::commands::validate::run(cli.config.as_deref()).await,
    }
}
