//! Core types and traits for the market analysis engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, MarketSnapshot)
//! - Trading signals and strategy definitions
//! - The error taxonomy shared by all layers
//! - Traits for upstream data providers and the injectable clock

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError, SniperError, SniperResult, StrategyError};
pub use traits::*;
pub use types::*;
