//! Core data types for the market analysis engine.

mod bar;
mod signal;
mod snapshot;
mod strategy;

pub use bar::{Bar, BarSeries};
pub use signal::{SignalAction, TradingSignal};
pub use snapshot::{MarketSnapshot, Session, Trend};
pub use strategy::{
    Difficulty, PerformanceRecord, StrategyDefinition, StrategyFamily, StrategyParams,
};
