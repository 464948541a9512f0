//! Technical indicators and the snapshot builder.
//!
//! This crate provides the indicator math shared by the live and backtest
//! paths:
//! - Moving averages (SMA, recursively smoothed EMA)
//! - Momentum (RSI)
//! - Volatility (ATR, Bollinger Bands)
//! - Channel extremes (Donchian) and volume ratio
//!
//! All series-producing indicators emit one output per input bar so live and
//! historical evaluation index the same way. The snapshot builder assembles
//! the full indicator set into immutable [`sniper_core::MarketSnapshot`]s.

pub mod channel;
pub mod momentum;
pub mod moving_average;
pub mod snapshot;
pub mod volatility;

pub use channel::{volume_ratio_series, DonchianChannel, DonchianPoint};
pub use momentum::Rsi;
pub use moving_average::{Ema, Sma};
pub use snapshot::SnapshotBuilder;
pub use volatility::{Atr, BollingerBands, BollingerPoint};
