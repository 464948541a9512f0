//! Upstream market-data provider traits.

use crate::error::DataError;
use crate::types::{Bar, BarSeries};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar interval for history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarInterval {
    Daily,
    /// Five-minute intraday bars.
    Minute5,
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarInterval::Daily => write!(f, "1d"),
            BarInterval::Minute5 => write!(f, "5m"),
        }
    }
}

/// A real-time quote from the primary upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub open: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl Quote {
    /// A quote without a positive price is unusable.
    pub fn is_usable(&self) -> bool {
        self.price > 0.0
    }
}

/// Historical-bars upstream.
///
/// `Ok(None)` means "this upstream has no data for the symbol"; errors are
/// reserved for faults callers may want to distinguish (HTTP, parse).
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch bars for the symbol, oldest first.
    async fn history(
        &self,
        symbol: &str,
        lookback_days: u32,
        interval: BarInterval,
        include_extended: bool,
    ) -> Result<Option<BarSeries>, DataError>;

    /// The most recent intraday bar, including pre/after-hours when available.
    /// Default implementation takes the last bar of a one-day 5m history.
    async fn latest_intraday(&self, symbol: &str) -> Result<Option<Bar>, DataError> {
        let series = self.history(symbol, 1, BarInterval::Minute5, true).await?;
        Ok(series.and_then(|s| s.last().copied()))
    }

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Real-time quote upstream.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the latest quote; `Ok(None)` when the upstream has no usable price.
    async fn quote(&self, symbol: &str) -> Result<Option<Quote>, DataError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_display() {
        assert_eq!(BarInterval::Daily.to_string(), "1d");
        assert_eq!(BarInterval::Minute5.to_string(), "5m");
    }

    #[test]
    fn test_quote_usable() {
        let mut quote = Quote {
            symbol: "AAPL".to_string(),
            price: 150.0,
            open: 149.0,
            day_high: 151.0,
            day_low: 148.5,
            previous_close: 149.5,
            change_percent: 0.33,
            timestamp: 1000,
        };
        assert!(quote.is_usable());
        quote.price = 0.0;
        assert!(!quote.is_usable());
    }
}
