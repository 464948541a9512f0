//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tradesniper")]
#[command(author, version, about = "Multi-agent market analysis and consensus signals")]
pub struct Cli {
    /// Configuration file path (optional; defaults apply without one)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and print market snapshots
    Snapshot(SnapshotArgs),
    /// Run the full strategy consensus on live data
    Consensus(ConsensusArgs),
    /// Replay strategies over historical bars
    Backtest(BacktestArgs),
    /// List registered strategies
    Strategies(StrategiesArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct SnapshotArgs {
    /// Symbols to fetch (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Bypass the snapshot cache
    #[arg(long)]
    pub no_cache: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct ConsensusArgs {
    /// Symbols to evaluate (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Strategy definitions file (JSON); built-ins when omitted
    #[arg(long)]
    pub strategies: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Symbols to replay (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    /// Replay a single strategy instead of the consensus
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Days of daily history to replay (config default when omitted)
    #[arg(long)]
    pub days: Option<u32>,

    /// Strategy definitions file (JSON); built-ins when omitted
    #[arg(long)]
    pub strategies: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save results to file as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct StrategiesArgs {
    /// Strategy definitions file (JSON); built-ins when omitted
    #[arg(long)]
    pub strategies: Option<PathBuf>,

    /// Sort by historical performance instead of registration order
    #[arg(long)]
    pub ranked: bool,
}
