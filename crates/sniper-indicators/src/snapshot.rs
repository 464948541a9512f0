//! Snapshot builder: derives one [`MarketSnapshot`] per bar from an OHLCV
//! series.
//!
//! Every value at index `i` depends only on bars `0..=i`, so a snapshot built
//! from the full series at index `i` is identical to one built from a series
//! truncated at `i`. The live path and the backtest replayer both rely on
//! this.

use sniper_core::{BarSeries, MarketSnapshot, Session, Trend};

use crate::channel::{volume_ratio_series, DonchianChannel};
use crate::momentum::Rsi;
use crate::moving_average::Ema;
use crate::volatility::{Atr, BollingerBands};

/// Bars required before the 50-period EMA is reported at all.
const EMA_50_MIN_BARS: usize = 21;

/// Builds full-indicator snapshots from bar series.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    session: Session,
    data_source: String,
}

impl SnapshotBuilder {
    pub fn new(data_source: impl Into<String>) -> Self {
        Self {
            session: Session::Regular,
            data_source: data_source.into(),
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Build one snapshot per bar in the series.
    pub fn build_all(&self, series: &BarSeries) -> Vec<MarketSnapshot> {
        if series.is_empty() {
            return Vec::new();
        }

        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();
        let len = closes.len();

        let ema_5 = Ema::new(5).calculate(&closes);
        let ema_9 = Ema::new(9).calculate(&closes);
        let ema_21 = Ema::new(21).calculate(&closes);
        let ema_50 = Ema::new(50).calculate(&closes);
        let rsi = Rsi::new(14).calculate(&closes);
        let bollinger = BollingerBands::new().calculate(&closes);
        let donchian_20 = DonchianChannel::new(20).calculate(&highs, &lows);
        let donchian_40 = DonchianChannel::new(40).calculate(&highs, &lows);
        let extremes_52w = DonchianChannel::new(252).calculate(&highs, &lows);
        let bars: Vec<_> = series.iter().copied().collect();
        let atr = Atr::new(14).calculate(&bars);
        let volume_ratio = volume_ratio_series(&volumes, 20);

        let mut snapshots = Vec::with_capacity(len);
        for i in 0..len {
            let bar = &bars[i];
            let price = bar.close;
            let change_percent = if i > 0 && closes[i - 1] != 0.0 {
                (price - closes[i - 1]) / closes[i - 1] * 100.0
            } else {
                0.0
            };

            let bb = bollinger[i];
            // The 40-bar channel degrades to the 20-bar value on short
            // histories.
            let d40 = if i + 1 >= 40 {
                donchian_40[i]
            } else {
                donchian_20[i]
            };

            snapshots.push(MarketSnapshot {
                symbol: series.symbol.to_uppercase(),
                price,
                ema_5: Some(ema_5[i]),
                ema_9: ema_9[i],
                ema_21: ema_21[i],
                ema_50: (i + 1 >= EMA_50_MIN_BARS).then(|| ema_50[i]),
                rsi: rsi[i].unwrap_or(50.0),
                volume_ratio: volume_ratio[i],
                support: donchian_20[i].lower,
                resistance: donchian_20[i].upper,
                bb_upper: bb.map(|b| b.upper).unwrap_or(0.0),
                bb_middle: bb.map(|b| b.middle).unwrap_or(0.0),
                bb_lower: bb.map(|b| b.lower).unwrap_or(0.0),
                donchian_upper_20: donchian_20[i].upper,
                donchian_lower_20: donchian_20[i].lower,
                donchian_upper_40: d40.upper,
                donchian_lower_40: d40.lower,
                atr: atr[i].unwrap_or(0.0),
                high_52w: extremes_52w[i].upper,
                low_52w: extremes_52w[i].lower,
                day_high: bar.high,
                day_low: bar.low,
                change_percent,
                trend: Trend::classify(price, ema_9[i], ema_21[i]),
                session: self.session,
                data_source: self.data_source.clone(),
                timestamp: bar.timestamp,
            });
        }

        snapshots
    }

    /// Build only the snapshot for the most recent bar.
    pub fn build_latest(&self, series: &BarSeries) -> Option<MarketSnapshot> {
        self.build_all(series).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_core::Bar;

    fn series(prices: &[f64]) -> BarSeries {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Bar::new(i as i64 * 86_400_000, p, p + 1.0, p - 1.0, p, 1000.0))
            .collect::<BarSeries>()
    }

    #[test]
    fn test_one_snapshot_per_bar() {
        let s = series(&[100.0; 60]);
        let snapshots = SnapshotBuilder::new("test").build_all(&s);
        assert_eq!(snapshots.len(), 60);
    }

    #[test]
    fn test_constant_series_is_neutral() {
        let s = series(&[100.0; 60]);
        let snapshot = SnapshotBuilder::new("test").build_latest(&s).unwrap();

        assert!((snapshot.ema_9 - 100.0).abs() < 1e-9);
        assert!((snapshot.ema_21 - 100.0).abs() < 1e-9);
        assert!((snapshot.bb_middle - 100.0).abs() < 1e-9);
        assert!((snapshot.volume_ratio - 1.0).abs() < 1e-9);
        assert!((snapshot.change_percent).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_neutral_before_window() {
        let s = series(&[100.0, 101.0, 102.0]);
        let snapshots = SnapshotBuilder::new("test").build_all(&s);
        assert_eq!(snapshots[2].rsi, 50.0);
    }

    #[test]
    fn test_donchian_40_degrades_to_20() {
        let s = series(&(0..30).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let snapshot = SnapshotBuilder::new("test").build_latest(&s).unwrap();

        assert!((snapshot.donchian_upper_40 - snapshot.donchian_upper_20).abs() < 1e-10);
        assert!((snapshot.donchian_lower_40 - snapshot.donchian_lower_20).abs() < 1e-10);
    }

    #[test]
    fn test_support_resistance_are_20_bar_extremes() {
        let prices: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let s = series(&prices);
        let snapshot = SnapshotBuilder::new("test").build_latest(&s).unwrap();

        // Last 20 bars: prices 105..=124, highs +1, lows -1
        assert!((snapshot.resistance - 125.0).abs() < 1e-10);
        assert!((snapshot.support - 104.0).abs() < 1e-10);
    }

    #[test]
    fn test_snapshots_are_causal() {
        // A snapshot at index i must not change when later bars are added.
        let prices: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0)
            .collect();
        let builder = SnapshotBuilder::new("test");

        let full = builder.build_all(&series(&prices));
        let truncated = builder.build_latest(&series(&prices[..50])).unwrap();

        assert!((full[49].ema_9 - truncated.ema_9).abs() < 1e-12);
        assert!((full[49].rsi - truncated.rsi).abs() < 1e-12);
        assert!((full[49].atr - truncated.atr).abs() < 1e-12);
        assert!((full[49].resistance - truncated.resistance).abs() < 1e-12);
    }

    #[test]
    fn test_ema_50_absent_on_short_history() {
        let s = series(&[100.0; 10]);
        let snapshot = SnapshotBuilder::new("test").build_latest(&s).unwrap();
        assert!(snapshot.ema_50.is_none());

        let s = series(&[100.0; 30]);
        let snapshot = SnapshotBuilder::new("test").build_latest(&s).unwrap();
        assert!(snapshot.ema_50.is_some());
    }
}
