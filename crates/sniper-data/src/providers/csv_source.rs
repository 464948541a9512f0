//! CSV-file history upstream, for offline replay and fixtures.
//!
//! Expects one file per symbol, `<SYMBOL>.csv`, with a
//! `timestamp,open,high,low,close,volume` header. Timestamps are Unix
//! milliseconds.

use async_trait::async_trait;
use serde::Deserialize;
use sniper_core::{Bar, BarInterval, BarSeries, DataError, HistoryProvider};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl From<CsvBar> for Bar {
    fn from(row: CsvBar) -> Self {
        Bar::new(row.timestamp, row.open, row.high, row.low, row.close, row.volume)
    }
}

/// Reads bar history from a directory of per-symbol CSV files.
pub struct CsvHistoryProvider {
    dir: PathBuf,
}

impl CsvHistoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl HistoryProvider for CsvHistoryProvider {
    async fn history(
        &self,
        symbol: &str,
        lookback_days: u32,
        _interval: BarInterval,
        _include_extended: bool,
    ) -> Result<Option<BarSeries>, DataError> {
        let symbol = symbol.to_uppercase();
        let path = self.dir.join(format!("{symbol}.csv"));
        if !path.exists() {
            return Ok(None);
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| DataError::Parse(e.to_string()))?;
        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvBar>() {
            let row = row.map_err(|e| DataError::Parse(e.to_string()))?;
            bars.push(Bar::from(row));
        }

        if bars.is_empty() {
            return Ok(None);
        }

        let mut series = BarSeries::from_bars(symbol, bars);
        if lookback_days > 0 {
            if let Some(last) = series.last() {
                let cutoff = last.timestamp - lookback_days as i64 * 86_400_000;
                series = BarSeries::from_bars(
                    series.symbol.clone(),
                    series.iter().copied().filter(|b| b.timestamp >= cutoff).collect(),
                );
            }
        }

        Ok(Some(series))
    }

    fn name(&self) -> &str {
        "csv"
    }
}
