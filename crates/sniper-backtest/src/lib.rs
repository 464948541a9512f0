//! Backtest replayer: walks a bar series forward and records what the
//! strategy layer would have signaled at each step.

pub mod engine;
pub mod report;

pub use engine::BacktestEngine;
pub use report::{BacktestResult, SampledDecision};
